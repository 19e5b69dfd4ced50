use chrono::{Duration, NaiveDateTime};

pub const DEFAULT_CONCENTRATION_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

/// Length of the two alternating phases. Every recorded concentration phase
/// is accounted as one concentration plus one break.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseDurations {
    pub concentration: Duration,
    pub break_time: Duration,
}

impl PhaseDurations {
    pub fn from_minutes(concentration: u32, break_time: u32) -> Self {
        Self {
            concentration: Duration::minutes(i64::from(concentration)),
            break_time: Duration::minutes(i64::from(break_time)),
        }
    }

    /// Working time accounted for one recorded phase.
    pub fn phase_length(&self) -> Duration {
        self.concentration + self.break_time
    }

    /// Working time accounted for `count` recorded phases.
    pub fn working_time(&self, count: usize) -> Duration {
        self.phase_length() * i32::try_from(count).unwrap_or(i32::MAX)
    }
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self::from_minutes(DEFAULT_CONCENTRATION_MINUTES, DEFAULT_BREAK_MINUTES)
    }
}

/// Phase timestamps for a manually entered block of `hours` working hours.
///
/// The block is cut into as many whole phases as fit; phase `k` (1-based) is
/// stamped at `start + k * phase_length`.
pub fn generate_working_phases(
    start: NaiveDateTime,
    hours: u32,
    durations: &PhaseDurations,
) -> Vec<NaiveDateTime> {
    let phase_minutes = durations.phase_length().num_minutes();
    if phase_minutes <= 0 {
        return Vec::new();
    }
    let count = i64::from(hours) * 60 / phase_minutes;
    (1..=count)
        .map(|k| start + Duration::minutes(k * phase_minutes))
        .collect()
}
