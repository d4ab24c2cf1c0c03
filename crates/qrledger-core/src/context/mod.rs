mod memory;

pub use memory::*;

use thiserror::Error as ThisError;

///
/// ContextError
///
/// Failure reported by the host while servicing a state or event call.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ContextError {
    #[error("read of '{key}' failed: {message}")]
    Read { key: String, message: String },

    #[error("write of '{key}' failed: {message}")]
    Write { key: String, message: String },

    #[error("event '{name}' rejected: {message}")]
    Event { name: String, message: String },
}

///
/// StateContext
///
/// Host-supplied handle for one invocation: keyed byte storage plus event emission.
/// Replication, ordering, and conflict detection happen behind this boundary.
///

pub trait StateContext {
    /// Read the value under `key`. `Ok(None)` and `Ok(Some(empty))` both mean absent.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, ContextError>;

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), ContextError>;

    fn set_event(&mut self, name: &str, payload: Vec<u8>) -> Result<(), ContextError>;
}

impl<C: StateContext + ?Sized> StateContext for &mut C {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, ContextError> {
        (**self).get_state(key)
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), ContextError> {
        (**self).put_state(key, value)
    }

    fn set_event(&mut self, name: &str, payload: Vec<u8>) -> Result<(), ContextError> {
        (**self).set_event(name, payload)
    }
}
