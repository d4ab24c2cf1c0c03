use super::*;
use crate::{
    context::{ContextError, MemoryContext},
    error::ContractErrorKind,
    obs::{MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink},
};
use serde_json::{Value, json};
use std::cell::RefCell;

///
/// RecordingSink
///

#[derive(Default)]
struct RecordingSink {
    events: RefCell<Vec<MetricsEvent>>,
}

impl MetricsSink for RecordingSink {
    fn record(&self, event: MetricsEvent) {
        self.events.borrow_mut().push(event);
    }
}

fn contract() -> AssetContract {
    AssetContract::new(LedgerConfig::default())
}

fn payload(value: &Value) -> Vec<u8> {
    serde_json::to_vec(value).expect("fixture payload encodes")
}

fn fish_payload(id: &str) -> Value {
    json!({
        "productId": id,
        "product_name_en": "Frozen Rui Fish",
        "species_en": "Rui",
        "mrp": 450.75,
        "net_weight": 1.25,
        "certification_en": ["HACCP"],
        "production_latitude": 24.1,
        "production_longitude": 89.9,
        "docType": "invoice"
    })
}

//
// init_ledger
//

#[test]
fn init_ledger_then_read_returns_bootstrap_hilsa() {
    let mut ctx = MemoryContext::new();
    let contract = contract();

    contract.init_ledger(&mut ctx).unwrap();
    let hilsa = contract.read_asset(&ctx, "1").unwrap();

    assert_eq!(hilsa.product_name_en, "Frozen Hilsa Fish");
    assert!((hilsa.mrp - 1200.5).abs() < f64::EPSILON);
    assert!((hilsa.net_weight - 2.5).abs() < f64::EPSILON);
    assert_eq!(hilsa.doc_type, "asset");
    assert_eq!(ctx.keys().collect::<Vec<_>>(), vec!["QR:1"]);
    assert!(ctx.events().is_empty(), "seeding emits no notifications");
}

#[test]
fn init_ledger_surfaces_write_failure() {
    let mut ctx = MemoryContext::new().fail_writes(true);

    let err = contract().init_ledger(&mut ctx).unwrap_err();

    assert_eq!(err.kind(), ContractErrorKind::StoreWrite);
    assert!(ctx.is_empty());
}

#[test]
fn init_ledger_overwrites_existing_seed() {
    let mut ctx = MemoryContext::new();
    ctx.insert_raw("QR:1", b"{\"productId\":\"1\"}".to_vec());

    contract().init_ledger(&mut ctx).unwrap();

    let hilsa = contract().read_asset(&ctx, "1").unwrap();
    assert_eq!(hilsa.species_en, "Hilsa");
}

//
// asset_exists
//

#[test]
fn exists_is_false_for_unwritten_ids() {
    let ctx = MemoryContext::new();

    assert!(!contract().asset_exists(&ctx, "missing").unwrap());
}

#[test]
fn exists_treats_empty_value_as_absent() {
    let mut ctx = MemoryContext::new();
    ctx.insert_raw("QR:blank", Vec::new());

    assert!(!contract().asset_exists(&ctx, "blank").unwrap());
}

#[test]
fn exists_surfaces_read_failure() {
    let ctx = MemoryContext::new().fail_reads(true);

    let err = contract().asset_exists(&ctx, "1").unwrap_err();

    assert_eq!(err.kind(), ContractErrorKind::StoreRead);
    assert!(matches!(err, ContractError::StoreRead(ContextError::Read { .. })));
}

//
// create_asset
//

#[test]
fn create_then_read_round_trips_with_stamped_doc_type() {
    let mut ctx = MemoryContext::new();
    let contract = contract();
    let input = fish_payload("2");

    contract.create_asset(&mut ctx, &payload(&input)).unwrap();
    let stored = contract.read_asset(&ctx, "2").unwrap();

    let mut expected: QrAsset = serde_json::from_value(input).unwrap();
    expected.doc_type = "asset".into();
    assert_eq!(stored, expected);
}

#[test]
fn create_emits_notification_with_product_id() {
    let mut ctx = MemoryContext::new();

    contract()
        .create_asset(&mut ctx, &payload(&json!({ "productId": "2" })))
        .unwrap();

    let events = ctx.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "QRCreated");
    let body: Value = serde_json::from_slice(&events[0].payload).unwrap();
    assert_eq!(body, json!({ "productId": "2" }));
}

#[test]
fn create_twice_rejects_duplicate_and_keeps_first() {
    let mut ctx = MemoryContext::new();
    let contract = contract();

    contract
        .create_asset(&mut ctx, &payload(&fish_payload("7")))
        .unwrap();
    let first = ctx.raw("QR:7").unwrap().to_vec();

    let mut second = fish_payload("7");
    second["mrp"] = json!(1.0);
    let err = contract
        .create_asset(&mut ctx, &payload(&second))
        .unwrap_err();

    assert_eq!(err.kind(), ContractErrorKind::DuplicateKey);
    assert_eq!(err.to_string(), "the asset 7 already exists");
    assert_eq!(ctx.raw("QR:7").unwrap(), first.as_slice());
    assert_eq!(ctx.events().len(), 1);
}

#[test]
fn create_rejects_malformed_payload() {
    let mut ctx = MemoryContext::new();

    let err = contract()
        .create_asset(&mut ctx, b"{\"productId\": 2")
        .unwrap_err();

    assert_eq!(err.kind(), ContractErrorKind::Deserialization);
    assert!(ctx.is_empty());
}

#[test]
fn create_rejects_missing_product_id() {
    let mut ctx = MemoryContext::new();

    let err = contract()
        .create_asset(&mut ctx, br#"{"product_name_en":"Nameless"}"#)
        .unwrap_err();

    assert_eq!(err.kind(), ContractErrorKind::Deserialization);
    assert!(ctx.is_empty());
}

#[test]
fn create_rejects_payload_over_configured_limit() {
    let mut ctx = MemoryContext::new();
    let contract = AssetContract::new(LedgerConfig::default().with_max_payload_bytes(16));

    let err = contract
        .create_asset(&mut ctx, &payload(&fish_payload("8")))
        .unwrap_err();

    assert!(matches!(
        err,
        ContractError::Deserialization {
            key: None,
            source: SerializeError::TooLarge { max_bytes: 16, .. },
        }
    ));
}

#[test]
fn create_propagates_exists_read_failure() {
    let mut ctx = MemoryContext::new().fail_reads(true);

    let err = contract()
        .create_asset(&mut ctx, &payload(&fish_payload("9")))
        .unwrap_err();

    assert_eq!(err.kind(), ContractErrorKind::StoreRead);
    assert!(ctx.is_empty());
}

#[test]
fn create_surfaces_write_failure_without_notifying() {
    let mut ctx = MemoryContext::new().fail_writes(true);

    let err = contract()
        .create_asset(&mut ctx, &payload(&fish_payload("10")))
        .unwrap_err();

    assert_eq!(err.kind(), ContractErrorKind::StoreWrite);
    assert!(ctx.events().is_empty());
}

#[test]
fn notification_failure_reports_error_but_record_stays_written() {
    let mut ctx = MemoryContext::new().fail_events(true);
    let contract = contract();

    let err = contract
        .create_asset(&mut ctx, &payload(&fish_payload("11")))
        .unwrap_err();

    assert_eq!(err.kind(), ContractErrorKind::Notification);
    assert!(contract.asset_exists(&ctx, "11").unwrap());
}

//
// read_asset
//

#[test]
fn read_of_unwritten_id_is_not_found() {
    let ctx = MemoryContext::new();

    let err = contract().read_asset(&ctx, "404").unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "the asset 404 does not exist");
}

#[test]
fn read_of_corrupt_bytes_is_stored_deserialization_error() {
    let mut ctx = MemoryContext::new();
    ctx.insert_raw("QR:bad", b"\x00\x01not json".to_vec());

    let err = contract().read_asset(&ctx, "bad").unwrap_err();

    assert!(matches!(
        err,
        ContractError::Deserialization { key: Some(ref k), .. } if k == "QR:bad"
    ));
}

#[test]
fn read_surfaces_read_failure() {
    let ctx = MemoryContext::new().fail_reads(true);

    let err = contract().read_asset(&ctx, "1").unwrap_err();

    assert_eq!(err.kind(), ContractErrorKind::StoreRead);
}

//
// null-valued fields
//

#[test]
fn create_accepts_null_for_string_and_list_fields() {
    let mut ctx = MemoryContext::new();
    let contract = contract();
    let body = br#"{"productId":"n1","certification_en":null,"product_name_en":null,"mrp":null}"#;

    contract.create_asset(&mut ctx, body).unwrap();
    let stored = contract.read_asset(&ctx, "n1").unwrap();

    assert!(stored.certification_en.is_empty());
    assert!(stored.product_name_en.is_empty());
    assert!(stored.mrp.abs() < f64::EPSILON);
    assert_eq!(stored.doc_type, "asset");
}

#[test]
fn read_decodes_records_stored_with_null_fields() {
    let mut ctx = MemoryContext::new();
    ctx.insert_raw(
        "QR:go",
        br#"{"productId":"go","product_name_en":null,"species_en":"Hilsa","source_of_agro_commodities_en":null,"source_of_agro_commodities_bn":null,"certification_en":null,"certification_bn":null,"docType":"asset"}"#
            .to_vec(),
    );

    let asset = contract().read_asset(&ctx, "go").unwrap();

    assert_eq!(asset.product_id, "go");
    assert_eq!(asset.species_en, "Hilsa");
    assert!(asset.product_name_en.is_empty());
    assert!(asset.source_of_agro_commodities_en.is_empty());
    assert!(asset.certification_bn.is_empty());
}

#[test]
fn null_product_id_is_rejected_like_a_missing_one() {
    let mut ctx = MemoryContext::new();

    let err = contract()
        .create_asset(&mut ctx, br#"{"productId":null}"#)
        .unwrap_err();

    assert_eq!(err.kind(), ContractErrorKind::Deserialization);
    assert!(ctx.is_empty());
}

//
// debug logging
//

#[test]
fn read_returns_records_with_a_foreign_doc_type() {
    let mut ctx = MemoryContext::new();
    ctx.insert_raw(
        "QR:inv",
        payload(&json!({ "productId": "inv", "docType": "invoice" })),
    );
    let contract = AssetContract::new(LedgerConfig::default().with_debug(true));

    let asset = contract.read_asset(&ctx, "inv").unwrap();

    assert!(!asset.is_asset());
    assert_eq!(asset.doc_type, "invoice");
}

#[test]
fn failures_keep_their_error_with_debug_logging_enabled() {
    metrics_reset_all();
    let mut ctx = MemoryContext::new();
    let contract = AssetContract::new(LedgerConfig::default().with_debug(true));

    contract
        .create_asset(&mut ctx, &payload(&json!({ "productId": "d1" })))
        .unwrap();
    let dup = contract
        .create_asset(&mut ctx, &payload(&json!({ "productId": "d1" })))
        .unwrap_err();
    let missing = contract.read_asset(&ctx, "d2").unwrap_err();

    assert_eq!(dup.kind(), ContractErrorKind::DuplicateKey);
    assert!(missing.is_not_found());
    let ops = metrics_report().ops;
    assert_eq!(ops.create_calls, 2);
    assert_eq!(ops.failed_calls, 2);
}

//
// metrics
//

#[test]
fn create_records_call_write_and_event() {
    let sink = RecordingSink::default();
    let mut ctx = MemoryContext::new();

    with_metrics_sink(&sink, || {
        contract()
            .create_asset(&mut ctx, &payload(&json!({ "productId": "m1" })))
            .unwrap();
    });

    let events = sink.events.into_inner();
    assert_eq!(events.len(), 4);
    assert_eq!(events[0], MetricsEvent::CallStart { op: OpKind::Create });
    assert!(matches!(events[1], MetricsEvent::RecordWritten { bytes } if bytes > 0));
    assert_eq!(events[2], MetricsEvent::EventEmitted);
    assert!(matches!(
        events[3],
        MetricsEvent::CallFinish {
            op: OpKind::Create,
            ok: true,
            ..
        }
    ));
}

#[test]
fn failed_read_counts_not_found_and_failure() {
    metrics_reset_all();
    let ctx = MemoryContext::new();

    let _ = contract().read_asset(&ctx, "nope");

    let ops = metrics_report().ops;
    assert_eq!(ops.read_calls, 1);
    assert_eq!(ops.not_found, 1);
    assert_eq!(ops.failed_calls, 1);
}

#[test]
fn disabled_metrics_record_nothing() {
    let sink = RecordingSink::default();
    let mut ctx = MemoryContext::new();
    let contract = AssetContract::new(LedgerConfig::default().with_metrics(false));

    with_metrics_sink(&sink, || {
        contract.init_ledger(&mut ctx).unwrap();
        contract.read_asset(&ctx, "1").unwrap();
    });

    assert!(sink.events.into_inner().is_empty());
}
