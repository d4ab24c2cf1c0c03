use crate::KEY_PREFIX;
use derive_more::Display;
use thiserror::Error as ThisError;

///
/// KeyDecodeError
/// (decode / corruption boundary)
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum KeyDecodeError {
    #[error("storage key '{0}' is missing the '{KEY_PREFIX}' prefix")]
    MissingPrefix(String),
}

///
/// AssetKey
///
/// World-state key of one asset record: `KEY_PREFIX` followed by the product id.
///

#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("{_0}")]
pub struct AssetKey(String);

impl AssetKey {
    #[must_use]
    pub fn from_product_id(product_id: &str) -> Self {
        let mut raw = String::with_capacity(KEY_PREFIX.len() + product_id.len());
        raw.push_str(KEY_PREFIX);
        raw.push_str(product_id);

        Self(raw)
    }

    /// Parse a raw storage key read back from the host.
    pub fn try_from_raw(raw: impl Into<String>) -> Result<Self, KeyDecodeError> {
        let raw = raw.into();
        if !raw.starts_with(KEY_PREFIX) {
            return Err(KeyDecodeError::MissingPrefix(raw));
        }

        Ok(Self(raw))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn product_id(&self) -> &str {
        &self.0[KEY_PREFIX.len()..]
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for AssetKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
