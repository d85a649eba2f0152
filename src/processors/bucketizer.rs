use crate::error::{ProcessingError, Result};
use crate::models::Observation;
use crate::utils::constants::{MAX_BUCKET_HOURS, MIN_BUCKET_HOURS, SECONDS_PER_HOUR};
use chrono::{DateTime, Utc};
use tracing::warn;

/// A run of time-ordered observations reported together
#[derive(Debug, Clone)]
pub struct Segment<'a> {
    pub bucket_start: i64,
    pub bucket_seconds: i64,
    pub observations: &'a [Observation],
}

impl<'a> Segment<'a> {
    /// Label of the window, in epoch seconds
    pub fn midpoint(&self) -> i64 {
        self.bucket_start.saturating_add(self.bucket_seconds / 2)
    }

    pub fn midpoint_time(&self) -> Result<DateTime<Utc>> {
        let midpoint = self.midpoint();
        DateTime::from_timestamp(midpoint, 0).ok_or(ProcessingError::InvalidTimestamp(midpoint))
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Splits observations into fixed-duration windows
#[derive(Debug, Clone)]
pub struct Bucketizer {
    bucket_hours: f64,
    bucket_seconds: i64,
    requested_start: Option<i64>,
}

impl Bucketizer {
    pub fn new(bucket_hours: f64) -> Result<Self> {
        // Output filenames resolve to the hour, so shorter windows would collide
        if !(MIN_BUCKET_HOURS..=MAX_BUCKET_HOURS).contains(&bucket_hours) {
            return Err(ProcessingError::Config(format!(
                "bucket_hours must be between {} and {}, got {}",
                MIN_BUCKET_HOURS, MAX_BUCKET_HOURS, bucket_hours
            )));
        }

        let bucket_seconds = (bucket_hours * SECONDS_PER_HOUR).round() as i64;

        Ok(Self {
            bucket_hours,
            bucket_seconds,
            requested_start: None,
        })
    }

    /// Start of the range the caller asked for; only used to flag anomalies
    pub fn with_requested_start(mut self, requested_start: i64) -> Self {
        self.requested_start = Some(requested_start);
        self
    }

    pub fn bucket_hours(&self) -> f64 {
        self.bucket_hours
    }

    pub fn bucket_seconds(&self) -> i64 {
        self.bucket_seconds
    }

    /// Sort `observations` by time and cut them into windows.
    ///
    /// The first window starts at the bucket boundary at or before the
    /// earliest observation. When an observation lands past the current
    /// window, the window closes and the start moves forward by exactly one
    /// bucket, even if the gap spans several. The trailing window is always
    /// emitted.
    pub fn segment<'a>(&self, observations: &'a mut [Observation]) -> Vec<Segment<'a>> {
        observations.sort_by_key(|o| o.timestamp);
        let observations: &'a [Observation] = observations;

        let Some(first) = observations.first() else {
            return Vec::new();
        };

        let earliest = first.timestamp;
        if let Some(requested) = self.requested_start {
            if earliest < requested {
                warn!(
                    "Earliest observation {} precedes requested start {}",
                    earliest, requested
                );
            }
        }

        let mut bucket_start = earliest - earliest.rem_euclid(self.bucket_seconds);
        let mut start_index = 0;
        let mut segments = Vec::new();

        for (i, obs) in observations.iter().enumerate() {
            if obs.timestamp >= bucket_start.saturating_add(self.bucket_seconds) {
                segments.push(Segment {
                    bucket_start,
                    bucket_seconds: self.bucket_seconds,
                    observations: &observations[start_index..i],
                });
                start_index = i;
                bucket_start = bucket_start.saturating_add(self.bucket_seconds);
            }
        }

        segments.push(Segment {
            bucket_start,
            bucket_seconds: self.bucket_seconds,
            observations: &observations[start_index..],
        });

        segments
    }
}
