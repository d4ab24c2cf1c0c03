mod bootstrap;


pub use bootstrap::bootstrap_assets;

use crate::{ASSET_DOC_TYPE, key::AssetKey};
use candid::CandidType;
use serde::{Deserialize, Deserializer, Serialize};

///
/// QrAsset
///
/// One traceable product record as it is stored in world state.
/// Field names on the wire are part of the external contract and must not change.
/// Descriptive fields that are absent or `null` decode to their empty value.
///

#[derive(CandidType, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct QrAsset {
    #[serde(rename = "productId", deserialize_with = "null_as_default")]
    pub product_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub product_name_en: String,
    #[serde(deserialize_with = "null_as_default")]
    pub product_name_bn: String,
    #[serde(deserialize_with = "null_as_default")]
    pub species_en: String,
    #[serde(deserialize_with = "null_as_default")]
    pub species_bn: String,
    #[serde(deserialize_with = "null_as_default")]
    pub product_image: String,
    #[serde(deserialize_with = "null_as_default")]
    pub processing_type_en: String,
    #[serde(deserialize_with = "null_as_default")]
    pub processing_type_bn: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date_of_harvesting: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date_of_packaging: String,
    #[serde(deserialize_with = "null_as_default")]
    pub expired_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mrp: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub source_of_agro_commodities_en: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub source_of_agro_commodities_bn: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub batch_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub lot_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub net_weight: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub certification_en: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub certification_bn: Vec<String>,

    // production site
    #[serde(deserialize_with = "null_as_default")]
    pub production_latitude: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub production_longitude: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub producer_organization_en: String,
    #[serde(deserialize_with = "null_as_default")]
    pub producer_organization_bn: String,

    // collection centre
    #[serde(deserialize_with = "null_as_default")]
    pub crop_collection_center_latitude: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub crop_collection_center_longitude: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub collector_organization_en: String,
    #[serde(deserialize_with = "null_as_default")]
    pub collector_organization_bn: String,

    // processing unit
    #[serde(deserialize_with = "null_as_default")]
    pub crop_processing_unit_latitude: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub crop_processing_unit_longitude: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub processor_organization_en: String,
    #[serde(deserialize_with = "null_as_default")]
    pub processor_organization_bn: String,

    #[serde(rename = "docType", deserialize_with = "null_as_default")]
    pub doc_type: String,
}

impl QrAsset {
    /// World-state key this record lives under.
    #[must_use]
    pub fn key(&self) -> AssetKey {
        AssetKey::from_product_id(&self.product_id)
    }

    /// Overwrite the discriminator with the asset tag, whatever the caller sent.
    pub fn stamp_doc_type(&mut self) {
        ASSET_DOC_TYPE.clone_into(&mut self.doc_type);
    }

    #[must_use]
    pub fn is_asset(&self) -> bool {
        self.doc_type == ASSET_DOC_TYPE
    }
}

// Explicit `null` is accepted wherever a missing field would be.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

///
/// AssetCreated
///
/// Notification payload emitted after an asset is written.
///

#[derive(CandidType, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AssetCreated {
    #[serde(rename = "productId")]
    pub product_id: String,
}

impl AssetCreated {
    #[must_use]
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
        }
    }
}
