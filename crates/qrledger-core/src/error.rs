use crate::{context::ContextError, serialize::SerializeError};
use std::fmt;
use thiserror::Error as ThisError;

///
/// ContractError
///
/// Terminal failure of one contract invocation.
/// The first error encountered is surfaced; nothing is retried or rolled back here.
///

#[derive(Debug, ThisError)]
pub enum ContractError {
    #[error("failed to serialize asset {product_id}: {source}")]
    Serialization {
        product_id: String,
        source: SerializeError,
    },

    /// `key` is set when the bytes came from the store rather than the caller.
    #[error("failed to deserialize asset{}: {source}", at_key(.key.as_deref()))]
    Deserialization {
        key: Option<String>,
        source: SerializeError,
    },

    #[error("failed to read from world state: {0}")]
    StoreRead(ContextError),

    #[error("failed to put to world state: {0}")]
    StoreWrite(ContextError),

    #[error("the asset {product_id} already exists")]
    DuplicateKey { product_id: String },

    #[error("the asset {product_id} does not exist")]
    NotFound { product_id: String },

    #[error("failed to set event: {0}")]
    Notification(ContextError),
}

impl ContractError {
    /// Construct a deserialize failure for a caller-supplied payload.
    pub(crate) fn payload(source: SerializeError) -> Self {
        Self::Deserialization { key: None, source }
    }

    /// Construct a deserialize failure for bytes already in the store.
    pub(crate) fn stored(key: impl Into<String>, source: SerializeError) -> Self {
        Self::Deserialization {
            key: Some(key.into()),
            source,
        }
    }

    /// Return a stable error kind independent of message text.
    #[must_use]
    pub const fn kind(&self) -> ContractErrorKind {
        match self {
            Self::Serialization { .. } => ContractErrorKind::Serialization,
            Self::Deserialization { .. } => ContractErrorKind::Deserialization,
            Self::StoreRead(_) => ContractErrorKind::StoreRead,
            Self::StoreWrite(_) => ContractErrorKind::StoreWrite,
            Self::DuplicateKey { .. } => ContractErrorKind::DuplicateKey,
            Self::NotFound { .. } => ContractErrorKind::NotFound,
            Self::Notification(_) => ContractErrorKind::Notification,
        }
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Deserialization { key: Some(_), .. } => ErrorClass::Corruption,
            Self::Deserialization { key: None, .. } => ErrorClass::Unsupported,
            Self::DuplicateKey { .. } => ErrorClass::Conflict,
            Self::NotFound { .. } => ErrorClass::NotFound,
            Self::Serialization { .. }
            | Self::StoreRead(_)
            | Self::StoreWrite(_)
            | Self::Notification(_) => ErrorClass::Internal,
        }
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        match self {
            Self::Serialization { .. } => ErrorOrigin::Serialize,
            Self::Deserialization { key: None, .. } => ErrorOrigin::Interface,
            Self::Deserialization { key: Some(_), .. }
            | Self::StoreRead(_)
            | Self::StoreWrite(_)
            | Self::DuplicateKey { .. }
            | Self::NotFound { .. } => ErrorOrigin::Store,
            Self::Notification(_) => ErrorOrigin::Event,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin(), self.class(), self)
    }
}

fn at_key(key: Option<&str>) -> String {
    key.map(|k| format!(" at {k}")).unwrap_or_default()
}

///
/// ContractErrorKind
///
/// Stable error-kind taxonomy for contract failures.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContractErrorKind {
    Serialization,
    Deserialization,
    StoreRead,
    StoreWrite,
    DuplicateKey,
    NotFound,
    Notification,
}

impl ContractErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Serialization => "serialization",
            Self::Deserialization => "deserialization",
            Self::StoreRead => "store_read",
            Self::StoreWrite => "store_write",
            Self::DuplicateKey => "duplicate_key",
            Self::NotFound => "not_found",
            Self::Notification => "notification",
        }
    }
}

impl fmt::Display for ContractErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Corruption,
    NotFound,
    Internal,
    Conflict,
    Unsupported,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Corruption => "corruption",
            Self::NotFound => "not_found",
            Self::Internal => "internal",
            Self::Conflict => "conflict",
            Self::Unsupported => "unsupported",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Serialize,
    Store,
    Event,
    Interface,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Serialize => "serialize",
            Self::Store => "store",
            Self::Event => "event",
            Self::Interface => "interface",
        };
        write!(f, "{label}")
    }
}
