mod host;

use canic_cdk::{export_candid, query, update};
use host::{LedgerEvent, StableContext};
use qrledger::{
    Error, Ledger,
    asset::QrAsset,
    obs::{MetricsReport, metrics_report, metrics_reset_all},
};

//
// INIT
//

thread_local! {
    static LEDGER: Result<Ledger, Error> =
        Ledger::from_toml_str(include_str!("../qrledger.toml"));
}

// Run `f` against the configured ledger; a bad embedded config fails every call.
fn with_ledger<R>(f: impl FnOnce(&Ledger) -> Result<R, Error>) -> Result<R, Error> {
    LEDGER.with(|ledger| match ledger {
        Ok(ledger) => f(ledger),
        Err(err) => Err(err.clone()),
    })
}

///
/// ENDPOINTS
///

/// init_ledger
/// Seed world state with the bootstrap records.
#[update]
pub fn init_ledger() -> Result<(), Error> {
    with_ledger(|ledger| ledger.init_ledger(&mut StableContext))
}

#[query]
pub fn asset_exists(product_id: String) -> Result<bool, Error> {
    with_ledger(|ledger| ledger.asset_exists(&StableContext, &product_id))
}

/// create_asset
/// Takes the asset as a JSON object using the external field names.
#[update]
pub fn create_asset(asset_json: String) -> Result<(), Error> {
    with_ledger(|ledger| ledger.create_asset(&mut StableContext, &asset_json))
}

#[query]
pub fn read_asset(product_id: String) -> Result<QrAsset, Error> {
    with_ledger(|ledger| ledger.read_asset(&StableContext, &product_id))
}

/// asset_count
/// Number of keys in world state.
#[query]
pub fn asset_count() -> u64 {
    StableContext::len()
}

/// ledger_events
/// Retained notifications from `since_seq` on, oldest first, one page at a time.
#[query]
pub fn ledger_events(since_seq: u64, limit: u32) -> Vec<LedgerEvent> {
    StableContext::events_since(since_seq, limit as usize)
}

#[query]
pub fn qrledger_metrics() -> MetricsReport {
    metrics_report()
}

#[update]
pub fn qrledger_metrics_reset() {
    metrics_reset_all();
}

export_candid!();
