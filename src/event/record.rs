use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload key holding an entity name.
pub const NAME_KEY: &str = "Name";
/// Payload key holding the category a day point belongs to.
pub const CATEGORY_ID_KEY: &str = "CategoryId";

/// One persisted line of the event log.
///
/// This is the untyped shape written to and read from storage. It is decoded
/// into [`Event`](super::Event) immediately after deserialization.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(rename = "type")]
    pub event_type: String,
    pub entity_id: Uuid,
    pub timestamp: NaiveDateTime,
    #[serde(default)]
    pub data: Option<HashMap<String, String>>,
}

impl EventRecord {
    pub fn new(event_type: impl Into<String>, entity_id: Uuid, timestamp: NaiveDateTime) -> Self {
        EventRecord {
            event_type: event_type.into(),
            entity_id,
            timestamp,
            data: None,
        }
    }

    /// Create a record carrying a string payload.
    pub fn with_data(
        event_type: impl Into<String>,
        entity_id: Uuid,
        timestamp: NaiveDateTime,
        data: HashMap<String, String>,
    ) -> Self {
        EventRecord {
            event_type: event_type.into(),
            entity_id,
            timestamp,
            data: Some(data),
        }
    }

    /// Get a payload value by key.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|data| data.get(key))
            .map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 1, 28)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn value_reads_payload() {
        let mut data = HashMap::new();
        data.insert(NAME_KEY.to_string(), "Projekt 1".to_string());
        let record = EventRecord::with_data("CategoryCreated", Uuid::new_v4(), at(6), data);

        assert_eq!(record.value(NAME_KEY), Some("Projekt 1"));
        assert_eq!(record.value(CATEGORY_ID_KEY), None);
    }

    #[test]
    fn value_without_payload() {
        let record = EventRecord::new("ItemDeleted", Uuid::new_v4(), at(6));
        assert_eq!(record.value(NAME_KEY), None);
    }

    #[test]
    fn json_line_shape() {
        let id = Uuid::new_v4();
        let record = EventRecord::new("WorkingPhaseFinished", id, at(7));
        let json = serde_json::to_string(&record).unwrap();

        assert!(json.contains("\"type\":\"WorkingPhaseFinished\""));
        assert!(json.contains(&format!("\"entityId\":\"{}\"", id)));
        assert!(json.contains("\"timestamp\":\"2021-01-28T07:00:00\""));
    }

    #[test]
    fn deserialize_without_data_field() {
        let json = r#"{"type":"ItemDeleted","entityId":"b7c416f5-cf8b-424c-b4d6-31e5cf4e0943","timestamp":"2021-01-30T08:00:00"}"#;
        let record: EventRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.event_type, "ItemDeleted");
        assert!(record.data.is_none());
    }
}
