use candid::CandidType;
use derive_more::Display;
use qrledger_core::{
    config::ConfigError,
    error::{ContractError, ContractErrorKind, ErrorOrigin as CoreErrorOrigin},
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(CandidType, Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound)
    }
}

impl From<ContractError> for Error {
    fn from(err: ContractError) -> Self {
        let kind = match err.kind() {
            ContractErrorKind::Serialization => ErrorKind::Serialization,
            ContractErrorKind::Deserialization => ErrorKind::Deserialization,
            ContractErrorKind::StoreRead => ErrorKind::StoreRead,
            ContractErrorKind::StoreWrite => ErrorKind::StoreWrite,
            ContractErrorKind::DuplicateKey => ErrorKind::DuplicateKey,
            ContractErrorKind::NotFound => ErrorKind::NotFound,
            ContractErrorKind::Notification => ErrorKind::Notification,
        };

        Self::new(kind, err.origin().into(), err.to_string())
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorKind::Config, ErrorOrigin::Config, err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers and canister interfaces.
///

#[derive(CandidType, Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// A record or event payload could not be encoded.
    #[display("serialization")]
    Serialization,

    /// Caller payload or stored bytes could not be decoded into an asset.
    #[display("deserialization")]
    Deserialization,

    #[display("store_read")]
    StoreRead,

    #[display("store_write")]
    StoreWrite,

    /// An asset with the same product id already exists.
    #[display("duplicate_key")]
    DuplicateKey,

    #[display("not_found")]
    NotFound,

    /// The record was written but the creation event was rejected.
    #[display("notification")]
    Notification,

    #[display("config")]
    Config,
}

///
/// ErrorOrigin
///

#[derive(CandidType, Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    #[display("serialize")]
    Serialize,
    #[display("store")]
    Store,
    #[display("event")]
    Event,
    #[display("interface")]
    Interface,
    #[display("config")]
    Config,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Serialize => Self::Serialize,
            CoreErrorOrigin::Store => Self::Store,
            CoreErrorOrigin::Event => Self::Event,
            CoreErrorOrigin::Interface => Self::Interface,
        }
    }
}
