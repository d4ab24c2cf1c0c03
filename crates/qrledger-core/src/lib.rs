//! Core runtime for QR Ledger: the asset record, storage keys, the host
//! state-context boundary, and the contract operations that run against it.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod asset;
pub mod config;
pub mod context;
pub mod contract;
pub mod error;
pub mod key;
pub mod obs;
pub mod serialize;

///
/// CONSTANTS
///

/// Namespace prefix shared by every asset storage key.
pub const KEY_PREFIX: &str = "QR:";

/// Discriminator written into every stored asset record.
pub const ASSET_DOC_TYPE: &str = "asset";

/// Name of the notification emitted after a successful create.
pub const ASSET_CREATED_EVENT: &str = "QRCreated";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or serializers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        asset::{AssetCreated, QrAsset},
        context::StateContext,
        contract::AssetContract,
        key::AssetKey,
    };
}
