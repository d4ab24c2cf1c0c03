use candid::CandidType;
use canic_cdk::structures::{
    BTreeMap, DefaultMemoryImpl,
    memory::{MemoryId, MemoryManager, VirtualMemory},
};
use derive_more::{Deref, DerefMut};
use qrledger::context::{ContextError, StateContext};
use serde::{Deserialize, Serialize};
use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
};

/// Stable memory slot holding world state.
const WORLD_STATE_MEMORY_ID: MemoryId = MemoryId::new(0);

/// Max bytes for a single stored value.
pub const MAX_VALUE_BYTES: usize = 4 * 1024 * 1024;

/// Events retained in the heap log; older ones are dropped first.
pub const MAX_EVENTS: usize = 1024;

/// Max events returned by one `events_since` call.
pub const MAX_EVENT_PAGE: usize = 100;

thread_local! {
    static MEMORY_MANAGER: MemoryManager<DefaultMemoryImpl> =
        MemoryManager::init(DefaultMemoryImpl::default());

    static WORLD_STATE: RefCell<WorldState> = RefCell::new(WorldState::init(
        MEMORY_MANAGER.with(|m| m.get(WORLD_STATE_MEMORY_ID)),
    ));

    static EVENT_LOG: RefCell<VecDeque<LedgerEvent>> = const { RefCell::new(VecDeque::new()) };

    static NEXT_EVENT_SEQ: Cell<u64> = const { Cell::new(0) };
}

///
/// WorldState
///

#[derive(Deref, DerefMut)]
pub struct WorldState(BTreeMap<String, Vec<u8>, VirtualMemory<DefaultMemoryImpl>>);

impl WorldState {
    /// Initialize world state over the provided backing memory.
    #[must_use]
    pub fn init(memory: VirtualMemory<DefaultMemoryImpl>) -> Self {
        Self(BTreeMap::init(memory))
    }
}

///
/// LedgerEvent
///
/// A notification emitted by a contract call, kept for callers to poll.
///

#[derive(CandidType, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct LedgerEvent {
    pub seq: u64,
    pub name: String,
    pub payload: String,
}

///
/// StableContext
///
/// State context over canister stable memory. Each endpoint call is one
/// transaction: the IC commits its writes when the call returns.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct StableContext;

impl StableContext {
    /// Retained events with `seq >= since_seq`, oldest first.
    /// At most `limit` events are returned, and never more than [`MAX_EVENT_PAGE`].
    #[must_use]
    pub fn events_since(since_seq: u64, limit: usize) -> Vec<LedgerEvent> {
        EVENT_LOG.with_borrow(|log| {
            log.iter()
                .skip_while(|event| event.seq < since_seq)
                .take(limit.min(MAX_EVENT_PAGE))
                .cloned()
                .collect()
        })
    }

    #[must_use]
    pub fn len() -> u64 {
        WORLD_STATE.with_borrow(|s| s.len())
    }
}

impl StateContext for StableContext {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, ContextError> {
        Ok(WORLD_STATE.with_borrow(|s| s.get(&key.to_string())))
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), ContextError> {
        if value.len() > MAX_VALUE_BYTES {
            return Err(ContextError::Write {
                key: key.to_string(),
                message: format!(
                    "value exceeds max size: {} bytes (limit {MAX_VALUE_BYTES})",
                    value.len()
                ),
            });
        }

        WORLD_STATE.with_borrow_mut(|s| s.insert(key.to_string(), value));

        Ok(())
    }

    fn set_event(&mut self, name: &str, payload: Vec<u8>) -> Result<(), ContextError> {
        let payload = String::from_utf8(payload).map_err(|err| ContextError::Event {
            name: name.to_string(),
            message: err.to_string(),
        })?;

        let seq = NEXT_EVENT_SEQ.replace(NEXT_EVENT_SEQ.get() + 1);
        EVENT_LOG.with_borrow_mut(|log| {
            if log.len() == MAX_EVENTS {
                log.pop_front();
            }
            log.push_back(LedgerEvent {
                seq,
                name: name.to_string(),
                payload,
            });
        });

        Ok(())
    }
}
