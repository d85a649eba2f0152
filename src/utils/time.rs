use crate::error::{ProcessingError, Result};
use crate::utils::constants::CLI_TIME_FORMAT;
use chrono::{NaiveDateTime, Utc};

/// Inclusive range of epoch seconds to ingest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: i64,
    pub end: i64,
}

impl TimeRange {
    pub fn new(start: i64, end: i64) -> Result<Self> {
        if start > end {
            return Err(ProcessingError::InvalidTimeRange(format!(
                "start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse one or two `YYYY-mm-dd_HH:MM` UTC times; a missing end means now
    pub fn from_args(times: &[String]) -> Result<Self> {
        match times {
            [start] => Self::new(parse_time(start)?, Utc::now().timestamp()),
            [start, end] => Self::new(parse_time(start)?, parse_time(end)?),
            _ => Err(ProcessingError::InvalidTimeRange(format!(
                "expected a start time and an optional end time, got {} value(s)",
                times.len()
            ))),
        }
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        (self.start..=self.end).contains(&timestamp)
    }
}

/// Parse a `YYYY-mm-dd_HH:MM` time as UTC epoch seconds
pub fn parse_time(value: &str) -> Result<i64> {
    let parsed = NaiveDateTime::parse_from_str(value, CLI_TIME_FORMAT)?;
    Ok(parsed.and_utc().timestamp())
}
