//! Weather reading models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::MetricId;
use crate::staleness::StalenessPolicy;

/// A reading as delivered by a source (live API, cache, or generator).
///
/// Any numeric field may be missing; the condition label may be empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawReading {
    #[serde(default)]
    pub temperature: Option<Decimal>,
    #[serde(default)]
    pub humidity: Option<Decimal>,
    #[serde(default)]
    pub pressure: Option<Decimal>,
    #[serde(default)]
    pub wind_speed: Option<Decimal>,
    #[serde(default)]
    pub uv_index: Option<Decimal>,
    #[serde(default)]
    pub uv_from_api: bool,
    #[serde(default)]
    pub air_quality: Option<Decimal>,
    #[serde(default)]
    pub condition: Option<String>,
}

/// Canonical weather snapshot used by the classifier and risk aggregator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    /// °C, rounded to a whole degree
    pub temperature: Option<Decimal>,
    /// Relative humidity, %
    pub humidity: Option<Decimal>,
    /// hPa
    pub pressure: Option<Decimal>,
    /// km/h
    pub wind_speed: Option<Decimal>,
    pub uv_index: Option<Decimal>,
    /// True only when the UV index was measured by a live source
    pub uv_from_api: bool,
    /// AQI
    pub air_quality: Option<Decimal>,
    pub condition: String,
}

impl Reading {
    /// Value of a single metric, if present
    pub fn value(&self, metric: MetricId) -> Option<Decimal> {
        match metric {
            MetricId::UvIndex => self.uv_index,
            MetricId::AirQuality => self.air_quality,
            MetricId::Temperature => self.temperature,
            MetricId::Humidity => self.humidity,
            MetricId::Pressure => self.pressure,
            MetricId::WindSpeed => self.wind_speed,
        }
    }
}

/// A reading kept by the cache together with when and where it was captured
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CachedReading {
    #[serde(flatten)]
    pub reading: Reading,
    pub captured_at: DateTime<Utc>,
    pub location: String,
}

impl CachedReading {
    pub fn new(reading: Reading, captured_at: DateTime<Utc>, location: impl Into<String>) -> Self {
        Self {
            reading,
            captured_at,
            location: location.into(),
        }
    }

    pub fn is_stale_at(&self, policy: &StalenessPolicy, now: DateTime<Utc>) -> bool {
        policy.is_stale_at(self.captured_at, now)
    }
}

/// Where a served reading came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReadingSource {
    Api,
    Cache,
    Simulated,
}

impl std::fmt::Display for ReadingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadingSource::Api => write!(f, "api"),
            ReadingSource::Cache => write!(f, "cache"),
            ReadingSource::Simulated => write!(f, "simulated"),
        }
    }
}
