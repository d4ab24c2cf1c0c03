use crate::{ASSET_DOC_TYPE, asset::QrAsset};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

/// Records written by `init_ledger`, in write order.
#[must_use]
pub fn bootstrap_assets() -> Vec<QrAsset> {
    vec![QrAsset {
        product_id: "1".into(),
        product_name_en: "Frozen Hilsa Fish".into(),
        product_name_bn: "Frozen Hilsa Fish".into(),
        species_en: "Hilsa".into(),
        species_bn: "Hilsa".into(),
        product_image: "https://fish.com/hilsa.jpg".into(),
        processing_type_en: "Frozen".into(),
        processing_type_bn: "Frozen".into(),
        date_of_harvesting: "2025-09-01".into(),
        date_of_packaging: "2025-09-03".into(),
        expired_date: "2026-03-01".into(),
        mrp: 1200.5,
        source_of_agro_commodities_en: strings(&["Filtered water", "Arsenic"]),
        source_of_agro_commodities_bn: strings(&["Filtered water", "Arsenic"]),
        batch_number: "BATCH-001".into(),
        lot_number: "LOT-001".into(),
        net_weight: 2.5,
        certification_en: strings(&["ISO22000", "HACCP"]),
        certification_bn: strings(&["ISO22000", "HACCP"]),
        production_latitude: 23.8103,
        production_longitude: 90.4125,
        producer_organization_en: "Padma Fisheries Ltd".into(),
        producer_organization_bn: "Padma Fisheries Ltd".into(),
        crop_collection_center_latitude: 23.90,
        crop_collection_center_longitude: 90.44,
        collector_organization_en: "Dhaka Fish Collectors".into(),
        collector_organization_bn: "Dhaka Fish Collectors".into(),
        crop_processing_unit_latitude: 23.75,
        crop_processing_unit_longitude: 90.39,
        processor_organization_en: "Bangladesh Fish Processing Ltd".into(),
        processor_organization_bn: "Bangladesh Fish Processing Ltd".into(),
        doc_type: ASSET_DOC_TYPE.into(),
    }]
}
