//! Monthly performance report.
//!
//! A pipeline of small stages turning the working days of a month into a
//! plain-text report grouped by category.

mod format;
mod performance_report;

use std::io;
use std::path::PathBuf;

use chrono::Duration;

pub use format::{format_time, month_name};
pub use performance_report::{
    calculate_group_working_times, compose_report, create_groups, determine_date,
    extract_working_points, suggest_file_name, PerformanceReport, ReportDate,
};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("no data for the requested period")]
    NoData,
    #[error("failed to write report to {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Accumulated time of one work item within a report group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProtocolEntry {
    pub name: String,
    pub time: Duration,
}

/// Report section for one category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProtocolGroup {
    pub name: String,
    pub total_time: Duration,
    pub entries: Vec<ProtocolEntry>,
}

impl ProtocolGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            total_time: Duration::zero(),
            entries: Vec::new(),
        }
    }
}
