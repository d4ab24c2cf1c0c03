//! QR Ledger: create and read traceable asset records through a host-supplied
//! world-state context.
//!
//! `qrledger-core` holds the runtime; this crate is the stable surface hosts
//! link against, with a Candid-encodable [`Error`].

pub mod error;

pub use error::{Error, ErrorKind, ErrorOrigin};

pub use qrledger_core::{ASSET_CREATED_EVENT, ASSET_DOC_TYPE, KEY_PREFIX};

pub mod asset {
    pub use qrledger_core::asset::{AssetCreated, QrAsset, bootstrap_assets};
}

pub mod config {
    pub use qrledger_core::config::{ConfigError, DEFAULT_MAX_PAYLOAD_BYTES, LedgerConfig};
}

pub mod context {
    pub use qrledger_core::context::{ContextError, EmittedEvent, MemoryContext, StateContext};
}

pub mod obs {
    pub use qrledger_core::obs::{
        EventOps, EventPerf, MetricsEvent, MetricsReport, MetricsSink, OpKind, metrics_report,
        metrics_reset_all, with_metrics_sink,
    };
}

pub use qrledger_core::{contract::AssetContract, key::AssetKey};

///
/// Ledger
///
/// `AssetContract` with errors lifted into the public [`Error`] type.
///

#[derive(Clone, Debug, Default)]
pub struct Ledger {
    contract: AssetContract,
}

impl Ledger {
    #[must_use]
    pub const fn new(config: config::LedgerConfig) -> Self {
        Self {
            contract: AssetContract::new(config),
        }
    }

    /// Build from TOML configuration text.
    pub fn from_toml_str(source: &str) -> Result<Self, Error> {
        Ok(Self::new(config::LedgerConfig::from_toml_str(source)?))
    }

    #[must_use]
    pub const fn contract(&self) -> &AssetContract {
        &self.contract
    }

    pub fn init_ledger<C>(&self, ctx: &mut C) -> Result<(), Error>
    where
        C: context::StateContext + ?Sized,
    {
        Ok(self.contract.init_ledger(ctx)?)
    }

    pub fn asset_exists<C>(&self, ctx: &C, product_id: &str) -> Result<bool, Error>
    where
        C: context::StateContext + ?Sized,
    {
        Ok(self.contract.asset_exists(ctx, product_id)?)
    }

    pub fn create_asset<C>(&self, ctx: &mut C, asset_json: &str) -> Result<(), Error>
    where
        C: context::StateContext + ?Sized,
    {
        Ok(self.contract.create_asset(ctx, asset_json.as_bytes())?)
    }

    pub fn read_asset<C>(&self, ctx: &C, product_id: &str) -> Result<asset::QrAsset, Error>
    where
        C: context::StateContext + ?Sized,
    {
        Ok(self.contract.read_asset(ctx, product_id)?)
    }
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Error, Ledger,
        asset::{AssetCreated, QrAsset},
        context::StateContext,
    };
}
