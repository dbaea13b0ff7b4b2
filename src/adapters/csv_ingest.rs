use crate::domain::model::ItemReceived;
use crate::utils::error::Result;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Reads item-received events from CSV with a header row.
///
/// Recognised columns: `tracking_number`, `received_at` (RFC 3339),
/// `weight_kg`, `volume_cbm`, `length_cm`, `width_cm`, `height_cm`.
/// Empty cells are treated as absent. Events come back in receipt order so
/// the earliest parcel opens the free period.
pub fn read_item_events<R: Read>(reader: R) -> Result<Vec<ItemReceived>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut events = Vec::new();
    for row in csv_reader.deserialize() {
        let event: ItemReceived = row?;
        events.push(event);
    }
    events.sort_by_key(|event| event.received_at);

    tracing::debug!("Read {} item events", events.len());
    Ok(events)
}

pub fn read_item_events_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ItemReceived>> {
    let file = File::open(&path)?;
    tracing::info!("📁 Reading item events from {}", path.as_ref().display());
    read_item_events(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ConsolidationError;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_read_events_with_optional_columns() {
        let data = "\
tracking_number,received_at,weight_kg,volume_cbm,length_cm,width_cm,height_cm
CJ1,2025-01-05T10:00:00Z,2.5,0.02,,,
,2025-01-03T08:30:00Z,1.0,,30,20,10
";
        let events = read_item_events(data.as_bytes()).unwrap();
        assert_eq!(events.len(), 2);

        // sorted by receipt time
        assert_eq!(
            events[0].received_at,
            Utc.with_ymd_and_hms(2025, 1, 3, 8, 30, 0).unwrap()
        );
        assert_eq!(events[0].tracking_number, None);
        assert_eq!(events[0].volume_cbm, None);
        assert!(events[0].dimensions().is_some());

        assert_eq!(events[1].tracking_number.as_deref(), Some("CJ1"));
        assert_eq!(events[1].volume_cbm, Some(0.02));
    }

    #[test]
    fn test_missing_optional_headers() {
        let data = "received_at,weight_kg,volume_cbm\n2025-01-05T10:00:00Z,2.5,0.02\n";
        let events = read_item_events(data.as_bytes()).unwrap();
        assert_eq!(events.len(), 1);
        assert!(events[0].dimensions().is_none());
    }

    #[test]
    fn test_bad_timestamp_is_csv_error() {
        let data = "received_at,weight_kg,volume_cbm\nyesterday,2.5,0.02\n";
        let err = read_item_events(data.as_bytes()).unwrap_err();
        assert!(matches!(err, ConsolidationError::CsvError(_)));
    }
}
