use crate::obs::sink::OpKind;
use candid::CandidType;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

///
/// EventState
/// Ephemeral, in-memory counters and instruction totals for contract calls.
///

#[derive(CandidType, Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub perf: EventPerf,
}

///
/// EventOps
///

#[derive(CandidType, Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // Contract entrypoints
    pub init_ledger_calls: u64,
    pub exists_calls: u64,
    pub create_calls: u64,
    pub read_calls: u64,

    // Outcomes
    pub failed_calls: u64,
    pub duplicate_rejections: u64,
    pub not_found: u64,

    // Side effects
    pub records_written: u64,
    pub bytes_written: u64,
    pub events_emitted: u64,
}

///
/// EventPerf
///

#[derive(CandidType, Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventPerf {
    // Instruction totals per entrypoint (performance_counter(1) on wasm)
    pub init_ledger_inst_total: u128,
    pub exists_inst_total: u128,
    pub create_inst_total: u128,
    pub read_inst_total: u128,

    // Maximum observed instruction deltas
    pub init_ledger_inst_max: u64,
    pub exists_inst_max: u64,
    pub create_inst_max: u64,
    pub read_inst_max: u64,
}

impl EventPerf {
    pub(crate) fn add(&mut self, op: OpKind, delta: u64) {
        let (total, max) = match op {
            OpKind::InitLedger => (
                &mut self.init_ledger_inst_total,
                &mut self.init_ledger_inst_max,
            ),
            OpKind::Exists => (&mut self.exists_inst_total, &mut self.exists_inst_max),
            OpKind::Create => (&mut self.create_inst_total, &mut self.create_inst_max),
            OpKind::Read => (&mut self.read_inst_total, &mut self.read_inst_max),
        };

        *total = total.saturating_add(u128::from(delta));
        if delta > *max {
            *max = delta;
        }
    }
}

///
/// MetricsReport
/// Point-in-time copy of the counters, returned by endpoints.
///

#[derive(CandidType, Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct MetricsReport {
    pub ops: EventOps,
    pub perf: EventPerf,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters.
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

pub(crate) fn report() -> MetricsReport {
    with_state(|m| MetricsReport {
        ops: m.ops.clone(),
        perf: m.perf.clone(),
    })
}
