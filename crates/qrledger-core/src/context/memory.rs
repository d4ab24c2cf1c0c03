use crate::context::{ContextError, StateContext};
use std::collections::BTreeMap;

///
/// EmittedEvent
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmittedEvent {
    pub name: String,
    pub payload: Vec<u8>,
}

///
/// MemoryContext
///
/// Heap-backed world state with an event log and switchable host failures.
///

#[derive(Clone, Debug, Default)]
pub struct MemoryContext {
    state: BTreeMap<String, Vec<u8>>,
    events: Vec<EmittedEvent>,
    fail_reads: bool,
    fail_writes: bool,
    fail_events: bool,
}

impl MemoryContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `get_state` fail.
    #[must_use]
    pub fn fail_reads(mut self, fail: bool) -> Self {
        self.fail_reads = fail;
        self
    }

    /// Make every subsequent `put_state` fail.
    #[must_use]
    pub fn fail_writes(mut self, fail: bool) -> Self {
        self.fail_writes = fail;
        self
    }

    /// Make every subsequent `set_event` fail.
    #[must_use]
    pub fn fail_events(mut self, fail: bool) -> Self {
        self.fail_events = fail;
        self
    }

    pub const fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    pub const fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub const fn set_fail_events(&mut self, fail: bool) {
        self.fail_events = fail;
    }

    /// Write raw bytes directly, bypassing failure switches.
    pub fn insert_raw(&mut self, key: impl Into<String>, value: Vec<u8>) {
        self.state.insert(key.into(), value);
    }

    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&[u8]> {
        self.state.get(key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.state.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    #[must_use]
    pub fn events(&self) -> &[EmittedEvent] {
        &self.events
    }
}

impl StateContext for MemoryContext {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, ContextError> {
        if self.fail_reads {
            return Err(ContextError::Read {
                key: key.to_string(),
                message: "injected read failure".into(),
            });
        }

        Ok(self.state.get(key).cloned())
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), ContextError> {
        if self.fail_writes {
            return Err(ContextError::Write {
                key: key.to_string(),
                message: "injected write failure".into(),
            });
        }

        self.state.insert(key.to_string(), value);

        Ok(())
    }

    fn set_event(&mut self, name: &str, payload: Vec<u8>) -> Result<(), ContextError> {
        if self.fail_events {
            return Err(ContextError::Event {
                name: name.to_string(),
                message: "injected event failure".into(),
            });
        }

        self.events.push(EmittedEvent {
            name: name.to_string(),
            payload,
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get_returns_bytes() {
        let mut ctx = MemoryContext::new();
        ctx.put_state("QR:1", b"{}".to_vec()).unwrap();

        assert_eq!(ctx.get_state("QR:1").unwrap(), Some(b"{}".to_vec()));
        assert_eq!(ctx.get_state("QR:2").unwrap(), None);
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn failure_switches_are_per_operation() {
        let mut ctx = MemoryContext::new().fail_writes(true);

        assert!(matches!(
            ctx.put_state("QR:1", vec![1]),
            Err(ContextError::Write { .. })
        ));
        assert_eq!(ctx.get_state("QR:1").unwrap(), None);
        ctx.set_event("QRCreated", vec![]).unwrap();
        assert_eq!(ctx.events().len(), 1);

        ctx.set_fail_writes(false);
        ctx.set_fail_reads(true);
        ctx.put_state("QR:1", vec![1]).unwrap();
        assert!(matches!(ctx.get_state("QR:1"), Err(ContextError::Read { .. })));
    }

    #[test]
    fn forwarding_through_mut_ref() {
        fn write_one(mut ctx: impl StateContext) {
            ctx.put_state("QR:9", vec![9]).unwrap();
        }

        let mut ctx = MemoryContext::new();
        write_one(&mut ctx);

        assert_eq!(ctx.raw("QR:9"), Some(&[9u8][..]));
    }
}
