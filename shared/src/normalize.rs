//! Conversion of raw source readings into canonical readings
//!
//! The normalizer only reshapes data. It never rejects a reading and never
//! range-checks values; see [`crate::validation::check_plausibility`] for that.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{RawReading, Reading};

/// Condition label used when the source provides none
pub const CONDITION_PLACEHOLDER: &str = "—";

pub fn normalize(raw: &RawReading) -> Reading {
    Reading {
        temperature: raw.temperature.map(round_half_up),
        humidity: raw.humidity,
        pressure: raw.pressure,
        wind_speed: raw.wind_speed,
        uv_index: raw.uv_index,
        uv_from_api: raw.uv_from_api,
        air_quality: raw.air_quality,
        // a whitespace-only label renders blank, so it counts as missing
        condition: raw
            .condition
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(CONDITION_PLACEHOLDER)
            .to_string(),
    }
}

/// Round to the nearest integer, halves toward positive infinity
/// (28.5 -> 29, -2.5 -> -2). Total over every `Decimal`, including the extremes.
pub fn round_half_up(value: Decimal) -> Decimal {
    let strategy = if value.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    value.round_dp_with_strategy(0, strategy)
}
