use box_consolidation::adapters::csv_ingest::read_item_events_from_path;
use box_consolidation::{BoxType, ConsolidationError, ConsolidationLifecycle, StorageStatus};
use chrono::{TimeZone, Utc};
use std::io::Write;
use tempfile::NamedTempFile;

fn events_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_replay_events_file_into_box() {
    let file = events_file(
        "\
tracking_number,received_at,weight_kg,volume_cbm,length_cm,width_cm,height_cm
HJ200,2025-01-04T09:00:00Z,3.0,,50,40,25
CJ100,2025-01-02T09:00:00Z,2.0,0.05,,,
",
    );

    let events = read_item_events_from_path(file.path()).unwrap();
    let lifecycle = ConsolidationLifecycle::default().with_storage_policy(14, 50);
    let mut b = lifecycle.create_box("BX-20", "cust-8", 1, events[0].received_at);
    for event in events {
        lifecycle.receive_item(&mut b, event).unwrap();
    }

    assert_eq!(b.items[0].tracking_number.as_deref(), Some("CJ100"));
    assert_eq!(
        b.free_period_end,
        Some(Utc.with_ymd_and_hms(2025, 1, 16, 9, 0, 0).unwrap())
    );
    assert!((b.total_weight_kg - 5.0).abs() < 1e-9);
    assert!((b.total_volume_cbm - 0.1).abs() < 1e-9);

    let now = Utc.with_ymd_and_hms(2025, 1, 17, 9, 0, 0).unwrap();
    assert_eq!(
        b.storage_status(now).unwrap(),
        StorageStatus::Overdue { days: 1, penalty: 50 }
    );
    let quote = lifecycle.close_box(&mut b, BoxType::Shared, now).unwrap();
    assert_eq!(quote.fees.total, 1120);
    assert_eq!(quote.total_due, 1170);
}

#[test]
fn test_event_without_volume_is_rejected() {
    let file = events_file("received_at,weight_kg\n2025-01-02T09:00:00Z,2.0\n");
    let events = read_item_events_from_path(file.path()).unwrap();

    let lifecycle = ConsolidationLifecycle::default();
    let mut b = lifecycle.create_box("BX-21", "cust-8", 2, events[0].received_at);
    let err = lifecycle.receive_item(&mut b, events[0].clone()).unwrap_err();
    assert!(matches!(err, ConsolidationError::InvalidArgument { .. }));
    assert!(b.items.is_empty());
    assert!(b.free_period_end.is_none());
}

#[test]
fn test_missing_events_file() {
    let err = read_item_events_from_path("/nonexistent/items.csv").unwrap_err();
    assert!(matches!(err, ConsolidationError::IoError(_)));
}
