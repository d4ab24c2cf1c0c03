//! Metrics sink boundary.
//!
//! Contract logic MUST NOT touch obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::obs::metrics::{self, MetricsReport};
use std::cell::RefCell;

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn MetricsSink>> = RefCell::new(None);
}

///
/// OpKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OpKind {
    InitLedger,
    Exists,
    Create,
    Read,
}

impl OpKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InitLedger => "init_ledger",
            Self::Exists => "asset_exists",
            Self::Create => "create_asset",
            Self::Read => "read_asset",
        }
    }
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    CallStart { op: OpKind },
    CallFinish { op: OpKind, ok: bool, inst_delta: u64 },
    DuplicateRejected,
    NotFound,
    RecordWritten { bytes: u64 },
    EventEmitted,
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local counter state.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::with_state_mut(|m| match event {
            MetricsEvent::CallStart { op } => {
                let calls = match op {
                    OpKind::InitLedger => &mut m.ops.init_ledger_calls,
                    OpKind::Exists => &mut m.ops.exists_calls,
                    OpKind::Create => &mut m.ops.create_calls,
                    OpKind::Read => &mut m.ops.read_calls,
                };
                *calls = calls.saturating_add(1);
            }

            MetricsEvent::CallFinish { op, ok, inst_delta } => {
                if !ok {
                    m.ops.failed_calls = m.ops.failed_calls.saturating_add(1);
                }
                m.perf.add(op, inst_delta);
            }

            MetricsEvent::DuplicateRejected => {
                m.ops.duplicate_rejections = m.ops.duplicate_rejections.saturating_add(1);
            }

            MetricsEvent::NotFound => {
                m.ops.not_found = m.ops.not_found.saturating_add(1);
            }

            MetricsEvent::RecordWritten { bytes } => {
                m.ops.records_written = m.ops.records_written.saturating_add(1);
                m.ops.bytes_written = m.ops.bytes_written.saturating_add(bytes);
            }

            MetricsEvent::EventEmitted => {
                m.ops.events_emitted = m.ops.events_emitted.saturating_add(1);
            }
        });
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_ptr = SINK_OVERRIDE.with(|cell| *cell.borrow());
    if let Some(ptr) = override_ptr {
        // SAFETY:
        // - `ptr` was produced from a valid `&dyn MetricsSink` in `with_metrics_sink`,
        //   which restores the previous slot on every exit, including unwind.
        // - `record` is synchronous and never stores `ptr` beyond this call.
        // - Only a shared reference is materialized, matching the original borrow.
        unsafe { (&*ptr).record(event) };
    } else {
        GLOBAL_METRICS_SINK.record(event);
    }
}

/// Snapshot the current counters for endpoint/test plumbing.
#[must_use]
pub fn metrics_report() -> MetricsReport {
    metrics::report()
}

/// Reset all counters and perf totals.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
pub fn with_metrics_sink<T>(sink: &dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<*const dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    // SAFETY:
    // - `sink_ptr` is installed only for this dynamic scope.
    // - `Guard` restores the previous slot on all exits, including panic.
    // - `record` only dereferences synchronously and never persists `sink_ptr`.
    let sink_ptr = unsafe { std::mem::transmute::<&dyn MetricsSink, *const dyn MetricsSink>(sink) };
    let prev = SINK_OVERRIDE.with(|cell| {
        let mut slot = cell.borrow_mut();
        slot.replace(sink_ptr)
    });
    let _guard = Guard(prev);

    f()
}

/// Span
/// RAII guard that emits start/finish events for one contract call.
/// Finish accounting happens even on early return or unwind.

pub(crate) struct Span {
    op: OpKind,
    enabled: bool,
    start: u64,
    ok: bool,
}

#[expect(clippy::missing_const_for_fn)]
fn read_perf_counter() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        canic_cdk::api::performance_counter(1)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        0
    }
}

impl Span {
    /// Start a span; with `enabled == false` nothing is recorded.
    #[must_use]
    pub(crate) fn new(op: OpKind, enabled: bool) -> Self {
        if enabled {
            record(MetricsEvent::CallStart { op });
        }

        Self {
            op,
            enabled,
            start: read_perf_counter(),
            ok: false,
        }
    }

    /// Record an intermediate event under this span's enablement.
    pub(crate) fn record(&self, event: MetricsEvent) {
        if self.enabled {
            record(event);
        }
    }

    /// Mark the call as successful; unmarked spans finish as failures.
    pub(crate) const fn succeed(&mut self) {
        self.ok = true;
    }
}

impl Drop for Span {
    fn drop(&mut self) {
        if self.enabled {
            let delta = read_perf_counter().saturating_sub(self.start);

            record(MetricsEvent::CallFinish {
                op: self.op,
                ok: self.ok,
                inst_delta: delta,
            });
        }
    }
}
