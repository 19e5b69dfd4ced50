//! Monthly working protocol.
//!
//! Projects recorded concentration phases onto the calendar: one
//! [`WorkingDay`] per weekday, one [`WorkingPoint`] per work item touched on
//! that day.

mod durations;
mod working_protocol;

use chrono::{Duration, NaiveDate};
use uuid::Uuid;

pub use durations::{
    generate_working_phases, PhaseDurations, DEFAULT_BREAK_MINUTES,
    DEFAULT_CONCENTRATION_MINUTES,
};
pub use working_protocol::{create_details, create_protocol, protocol_years, NO_CATEGORY};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("no such month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },
}

/// Time spent on one work item during one day.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkingPoint {
    pub work_item_id: Uuid,
    pub name: String,
    pub category: String,
    pub working_time: Duration,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkingDay {
    pub date: NaiveDate,
    pub working_points: Vec<WorkingPoint>,
    pub total_work_time: Duration,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkItemDetailsEntry {
    pub date: NaiveDate,
    pub time: Duration,
}

/// A work item's recorded time broken down by calendar day.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkItemDetails {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub working_days: Vec<WorkItemDetailsEntry>,
}
