use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chrono::{Datelike, Duration};
use log::info;
use unicode_width::UnicodeWidthStr;

use super::format::{format_time, month_name};
use super::{ProtocolEntry, ProtocolGroup, ReportError};
use crate::protocol::{WorkingDay, WorkingPoint};

/// Month and year a report covers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportDate {
    pub month_name: &'static str,
    pub year: i32,
}

impl std::fmt::Display for ReportDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.month_name, self.year)
    }
}

/// Month and year of the first working day. Callers pass the days of a single
/// month.
pub fn determine_date(working_days: &[WorkingDay]) -> Result<ReportDate, ReportError> {
    let first = working_days.first().ok_or(ReportError::NoData)?;
    Ok(ReportDate {
        month_name: month_name(first.date),
        year: first.date.year(),
    })
}

pub fn extract_working_points(working_days: &[WorkingDay]) -> Vec<WorkingPoint> {
    working_days
        .iter()
        .flat_map(|day| day.working_points.iter().cloned())
        .collect()
}

/// Group points by category, merging points of the same name. Groups and
/// entries keep the order in which they were first seen. Totals are left at
/// zero; see [`calculate_group_working_times`].
pub fn create_groups(working_points: &[WorkingPoint]) -> Vec<ProtocolGroup> {
    let mut groups: Vec<ProtocolGroup> = Vec::new();
    for point in working_points {
        let group = match groups.iter().position(|group| group.name == point.category) {
            Some(index) => &mut groups[index],
            None => {
                groups.push(ProtocolGroup::new(point.category.clone()));
                let last = groups.len() - 1;
                &mut groups[last]
            }
        };

        match group.entries.iter_mut().find(|entry| entry.name == point.name) {
            Some(entry) => entry.time = entry.time + point.working_time,
            None => group.entries.push(ProtocolEntry {
                name: point.name.clone(),
                time: point.working_time,
            }),
        }
    }
    groups
}

pub fn calculate_group_working_times(mut groups: Vec<ProtocolGroup>) -> Vec<ProtocolGroup> {
    for group in &mut groups {
        group.total_time = group
            .entries
            .iter()
            .fold(Duration::zero(), |total, entry| total + entry.time);
    }
    groups
}

/// Render the report text.
///
/// Entry names are left-aligned and entry times right-aligned, both to the
/// widest value across all groups. Without groups only the title is written.
pub fn compose_report(date: &ReportDate, groups: &[ProtocolGroup]) -> String {
    let entries = groups.iter().flat_map(|group| group.entries.iter());
    let name_width = entries
        .clone()
        .map(|entry| entry.name.width())
        .max()
        .unwrap_or(0);
    let time_width = entries
        .map(|entry| format_time(entry.time).width())
        .max()
        .unwrap_or(0);

    let mut text = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(text, "Leistungsbericht {}", date);
    text.push('\n');
    for group in groups {
        let _ = writeln!(text, "  {} ({})", group.name, format_time(group.total_time));
        for entry in &group.entries {
            let time = format_time(entry.time);
            let _ = writeln!(
                text,
                "    - {}{}      {}{}",
                entry.name,
                padding(name_width, entry.name.width()),
                padding(time_width, time.width()),
                time
            );
        }
        text.push('\n');
    }
    text
}

pub fn suggest_file_name(date: &ReportDate) -> String {
    format!("Leistungsbericht {}.txt", date)
}

fn padding(width: usize, used: usize) -> String {
    " ".repeat(width.saturating_sub(used))
}

/// A rendered report together with its suggested file name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PerformanceReport {
    pub text: String,
    pub file_name: String,
}

impl PerformanceReport {
    /// Run the full pipeline over the working days of one month.
    pub fn create(working_days: &[WorkingDay]) -> Result<Self, ReportError> {
        let date = determine_date(working_days)?;
        let points = extract_working_points(working_days);
        let groups = calculate_group_working_times(create_groups(&points));
        let text = compose_report(&date, &groups);
        Ok(PerformanceReport {
            text,
            file_name: suggest_file_name(&date),
        })
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let path = path.as_ref();
        fs::write(path, &self.text).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            "event=report_written module=report path={} bytes={}",
            path.display(),
            self.text.len()
        );
        Ok(())
    }
}
