use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ProcessingError, Result};

/// A single super observation as served by the WindBorne sensor-data API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Unix epoch seconds, UTC
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: i64,

    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub mission_name: Option<String>,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,

    // hPa
    #[serde(default)]
    pub pressure: Option<f64>,

    // °C
    #[serde(default)]
    pub temperature: Option<f64>,

    // m
    #[serde(default)]
    pub altitude: Option<f64>,

    // m/s
    #[serde(default)]
    pub speed_u: Option<f64>,

    #[serde(default)]
    pub speed_v: Option<f64>,

    // %
    #[serde(default)]
    pub humidity: Option<f64>,
}

impl Observation {
    pub fn new(timestamp: i64) -> Self {
        Self {
            timestamp,
            ..Self::default()
        }
    }

    pub fn with_mission(mut self, mission_name: &str) -> Self {
        self.mission_name = Some(mission_name.to_string());
        self
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_position(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn observed_at(&self) -> Result<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
            .ok_or(ProcessingError::InvalidTimestamp(self.timestamp))
    }

    /// Mission name, treating an empty string as missing
    pub fn mission(&self) -> Option<&str> {
        self.mission_name.as_deref().filter(|m| !m.is_empty())
    }
}

/// One page of the super observations endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObservationPage {
    #[serde(default)]
    pub observations: Vec<Observation>,

    #[serde(default)]
    pub has_next_page: bool,

    #[serde(default)]
    pub next_page: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Integer(i64),
    Float(f64),
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Integer(ts) => Ok(ts),
        RawTimestamp::Float(ts) if ts.is_finite() => Ok(ts.trunc() as i64),
        RawTimestamp::Float(ts) => Err(serde::de::Error::custom(format!(
            "timestamp {} is not finite",
            ts
        ))),
    }
}
