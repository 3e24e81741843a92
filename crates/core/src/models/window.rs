//! Half-open `[start, end)` time ranges in UTC.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ScheduleError, ScheduleResult};

/// A non-empty half-open interval `[start, end)`.
///
/// The only way to build one is through [`TimeWindow::new`] (or deserializing,
/// which goes through the same check), so `end > start` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct TimeWindow {
    #[serde(rename = "startTime")]
    start: DateTime<Utc>,
    #[serde(rename = "endTime")]
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWindow {
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
}

impl TryFrom<RawWindow> for TimeWindow {
    type Error = ScheduleError;

    fn try_from(raw: RawWindow) -> ScheduleResult<Self> {
        TimeWindow::new(raw.start_time, raw.end_time)
    }
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> ScheduleResult<Self> {
        if end <= start {
            return Err(ScheduleError::InvalidWindow(format!(
                "end {} must be after start {}",
                end.to_rfc3339(),
                start.to_rfc3339()
            )));
        }
        Ok(Self { start, end })
    }

    /// Builds the window `[start, start + duration)`.
    pub fn starting_at(start: DateTime<Utc>, duration: Duration) -> ScheduleResult<Self> {
        let end = start.checked_add_signed(duration).ok_or_else(|| {
            ScheduleError::InvalidWindow(format!("duration overflows from {}", start.to_rfc3339()))
        })?;
        Self::new(start, end)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Windows that only touch at an endpoint do not overlap.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        crate::engine::interval::overlaps(self, other)
    }

    pub fn contains(&self, inner: &TimeWindow) -> bool {
        crate::engine::interval::contains(self, inner)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses a client supplied timestamp.
///
/// RFC 3339 strings keep their offset and are converted to UTC. Strings with no
/// offset at all (the `datetime-local` form browsers submit) are read as UTC.
pub fn parse_instant(input: &str) -> ScheduleResult<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ScheduleError::InvalidWindow(format!("Invalid date format: {}", input)))
}

/// Parses both bounds and validates the resulting window.
pub fn parse_window(start: &str, end: &str) -> ScheduleResult<TimeWindow> {
    TimeWindow::new(parse_instant(start)?, parse_instant(end)?)
}
