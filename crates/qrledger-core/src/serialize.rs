//! JSON codec for stored records and event payloads.
//!
//! Records are written exactly as serde_json renders them, so the stored
//! bytes keep the external field names. Size limits belong to the caller.

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error as ThisError;

///
/// SerializeError
///

#[derive(Debug, ThisError)]
pub enum SerializeError {
    #[error("json encode failed: {0}")]
    Encode(String),

    #[error("json decode failed: {0}")]
    Decode(String),

    #[error("input of {len} bytes exceeds the {max_bytes} byte limit")]
    TooLarge { len: usize, max_bytes: usize },
}

/// Encode `value` as compact JSON.
pub fn serialize<T>(value: &T) -> Result<Vec<u8>, SerializeError>
where
    T: Serialize,
{
    serde_json::to_vec(value).map_err(|err| SerializeError::Encode(err.to_string()))
}

pub fn deserialize<T>(bytes: &[u8]) -> Result<T, SerializeError>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(bytes).map_err(|err| SerializeError::Decode(err.to_string()))
}

/// Like [`deserialize`], but input longer than `max_bytes` is refused unread.
pub fn deserialize_bounded<T>(bytes: &[u8], max_bytes: usize) -> Result<T, SerializeError>
where
    T: DeserializeOwned,
{
    if bytes.len() > max_bytes {
        return Err(SerializeError::TooLarge {
            len: bytes.len(),
            max_bytes,
        });
    }

    deserialize(bytes)
}
