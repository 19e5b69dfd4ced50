use chrono::{Datelike, Duration, NaiveDate};

const MONTH_NAMES: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// Render a duration as `"<H>h <M>min"`, or `"<MM>min"` below one hour.
///
/// A zero duration renders as an empty string.
pub fn format_time(time: Duration) -> String {
    if time.is_zero() {
        return String::new();
    }
    let hours = time.num_hours();
    let minutes = time.num_minutes() % 60;
    if hours < 1 {
        format!("{:02}min", minutes)
    } else {
        format!("{}h {}min", hours, minutes)
    }
}

/// German name of the date's month.
pub fn month_name(date: NaiveDate) -> &'static str {
    MONTH_NAMES[date.month0() as usize]
}
