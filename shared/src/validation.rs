//! Validation of threshold configuration and reading plausibility

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::models::{MetricId, Reading};
use crate::thresholds::{
    AQI_TABLE, HUMIDITY_TABLE, PLAUSIBLE_AIR_QUALITY, PLAUSIBLE_HUMIDITY, PLAUSIBLE_PRESSURE,
    PLAUSIBLE_TEMPERATURE, PLAUSIBLE_UV_INDEX, PLAUSIBLE_WIND_SPEED, PRESSURE_TABLE, RISK_TABLE,
    SIGNAL_TABLE, TEMPERATURE_TABLE, UV_TABLE, WIND_TABLE,
};

// ============================================================================
// Threshold Tables
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThresholdError {
    #[error("threshold table '{metric}' has no bands")]
    EmptyTable { metric: &'static str },

    #[error("threshold table '{metric}': bound {bound} at index {index} does not exceed {previous}")]
    UnorderedBounds {
        metric: &'static str,
        index: usize,
        previous: Decimal,
        bound: Decimal,
    },

    #[error("threshold table '{metric}': category at index {index} does not rank above its predecessor")]
    UnorderedCategories { metric: &'static str, index: usize },
}

/// Validate every built-in table. Run once at startup.
pub fn validate_threshold_tables() -> Result<(), ThresholdError> {
    UV_TABLE.validate()?;
    AQI_TABLE.validate()?;
    TEMPERATURE_TABLE.validate()?;
    HUMIDITY_TABLE.validate()?;
    PRESSURE_TABLE.validate()?;
    WIND_TABLE.validate()?;
    RISK_TABLE.validate()?;
    SIGNAL_TABLE.validate()?;
    Ok(())
}

// ============================================================================
// Reading Plausibility
// ============================================================================

/// A measurement outside the physically plausible range for its metric.
///
/// Issues are advisory: classification still runs on the raw value.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlausibilityIssue {
    pub metric: MetricId,
    pub value: Decimal,
    pub min: Decimal,
    pub max: Decimal,
}

fn plausible_range(metric: MetricId) -> (i64, i64) {
    match metric {
        MetricId::Temperature => PLAUSIBLE_TEMPERATURE,
        MetricId::Humidity => PLAUSIBLE_HUMIDITY,
        MetricId::Pressure => PLAUSIBLE_PRESSURE,
        MetricId::WindSpeed => PLAUSIBLE_WIND_SPEED,
        MetricId::UvIndex => PLAUSIBLE_UV_INDEX,
        MetricId::AirQuality => PLAUSIBLE_AIR_QUALITY,
    }
}

/// List the present values that fall outside their plausible range
pub fn check_plausibility(reading: &Reading) -> Vec<PlausibilityIssue> {
    MetricId::ALL
        .into_iter()
        .filter_map(|metric| {
            let value = reading.value(metric)?;
            let (min, max) = plausible_range(metric);
            let (min, max) = (Decimal::from(min), Decimal::from(max));
            (value < min || value > max).then_some(PlausibilityIssue {
                metric,
                value,
                min,
                max,
            })
        })
        .collect()
}
