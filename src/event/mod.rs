//! Domain events.
//!
//! Events are stored as untyped [`EventRecord`]s and decoded into typed
//! [`EventKind`] variants as soon as they cross the storage boundary.
//! Unknown event types survive decoding as [`EventKind::Other`] so that
//! newer logs can still be read and written back unchanged.

mod record;

use std::collections::HashMap;

use chrono::NaiveDateTime;
use uuid::Uuid;

pub use record::{EventRecord, CATEGORY_ID_KEY, NAME_KEY};

pub const CATEGORY_CREATED: &str = "CategoryCreated";
pub const NAME_CHANGED: &str = "NameChanged";
pub const ITEM_DELETED: &str = "ItemDeleted";
pub const DAY_POINT_CREATED: &str = "DayPointCreated";
pub const DAY_POINT_FINISHED: &str = "DayPointFinished";
pub const WORKING_PHASE_FINISHED: &str = "WorkingPhaseFinished";

/// Error when a known event type carries an unusable payload.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("{event_type} event is missing the `{key}` field")]
    MissingField {
        event_type: &'static str,
        key: &'static str,
    },
    #[error("{event_type} event has an invalid `{key}` field: {value}")]
    InvalidField {
        event_type: &'static str,
        key: &'static str,
        value: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventKind {
    CategoryCreated { name: String },
    DayPointCreated { name: String, category_id: Option<Uuid> },
    NameChanged { name: String },
    WorkingPhaseFinished,
    DayPointFinished,
    ItemDeleted,
    Other {
        event_type: String,
        data: Option<HashMap<String, String>>,
    },
}

impl EventKind {
    pub fn event_type(&self) -> &str {
        match self {
            EventKind::CategoryCreated { .. } => CATEGORY_CREATED,
            EventKind::DayPointCreated { .. } => DAY_POINT_CREATED,
            EventKind::NameChanged { .. } => NAME_CHANGED,
            EventKind::WorkingPhaseFinished => WORKING_PHASE_FINISHED,
            EventKind::DayPointFinished => DAY_POINT_FINISHED,
            EventKind::ItemDeleted => ITEM_DELETED,
            EventKind::Other { event_type, .. } => event_type,
        }
    }

    /// Whether this event erases the aggregate it belongs to.
    pub fn is_tombstone(&self) -> bool {
        matches!(self, EventKind::ItemDeleted)
    }
}

/// An immutable fact about one entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub entity_id: Uuid,
    pub timestamp: NaiveDateTime,
    pub kind: EventKind,
}

impl Event {
    pub fn new(entity_id: Uuid, timestamp: NaiveDateTime, kind: EventKind) -> Self {
        Event {
            entity_id,
            timestamp,
            kind,
        }
    }

    pub fn event_type(&self) -> &str {
        self.kind.event_type()
    }

    /// Encode into the persisted record shape.
    pub fn to_record(&self) -> EventRecord {
        let data = match &self.kind {
            EventKind::CategoryCreated { name } | EventKind::NameChanged { name } => {
                Some(HashMap::from([(NAME_KEY.to_string(), name.clone())]))
            }
            EventKind::DayPointCreated { name, category_id } => {
                let mut data = HashMap::from([(NAME_KEY.to_string(), name.clone())]);
                if let Some(category_id) = category_id {
                    data.insert(CATEGORY_ID_KEY.to_string(), category_id.to_string());
                }
                Some(data)
            }
            EventKind::WorkingPhaseFinished
            | EventKind::DayPointFinished
            | EventKind::ItemDeleted => None,
            EventKind::Other { data, .. } => data.clone(),
        };

        EventRecord {
            event_type: self.event_type().to_string(),
            entity_id: self.entity_id,
            timestamp: self.timestamp,
            data,
        }
    }
}

impl TryFrom<EventRecord> for Event {
    type Error = PayloadError;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        let kind = match record.event_type.as_str() {
            CATEGORY_CREATED => EventKind::CategoryCreated {
                name: required(&record, CATEGORY_CREATED, NAME_KEY)?,
            },
            NAME_CHANGED => EventKind::NameChanged {
                name: required(&record, NAME_CHANGED, NAME_KEY)?,
            },
            DAY_POINT_CREATED => EventKind::DayPointCreated {
                name: required(&record, DAY_POINT_CREATED, NAME_KEY)?,
                category_id: category_id(&record)?,
            },
            WORKING_PHASE_FINISHED => EventKind::WorkingPhaseFinished,
            DAY_POINT_FINISHED => EventKind::DayPointFinished,
            ITEM_DELETED => EventKind::ItemDeleted,
            _ => EventKind::Other {
                event_type: record.event_type.clone(),
                data: record.data.clone(),
            },
        };

        Ok(Event {
            entity_id: record.entity_id,
            timestamp: record.timestamp,
            kind,
        })
    }
}

impl From<&Event> for EventRecord {
    fn from(event: &Event) -> Self {
        event.to_record()
    }
}

fn required(
    record: &EventRecord,
    event_type: &'static str,
    key: &'static str,
) -> Result<String, PayloadError> {
    record
        .value(key)
        .map(str::to_string)
        .ok_or(PayloadError::MissingField { event_type, key })
}

// Missing, empty and nil ids all mean "no category".
fn category_id(record: &EventRecord) -> Result<Option<Uuid>, PayloadError> {
    let Some(raw) = record.value(CATEGORY_ID_KEY) else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let id = Uuid::parse_str(raw.trim()).map_err(|_| PayloadError::InvalidField {
        event_type: DAY_POINT_CREATED,
        key: CATEGORY_ID_KEY,
        value: raw.to_string(),
    })?;
    Ok((!id.is_nil()).then_some(id))
}
