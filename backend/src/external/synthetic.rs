//! Synthetic readings used when no live source answers

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use shared::{
    RawReading, SIM_AIR_QUALITY_RANGE, SIM_CONDITIONS, SIM_HUMIDITY_RANGE, SIM_PRESSURE_RANGE,
    SIM_TEMPERATURE_RANGE, SIM_UV_INDEX_RANGE, SIM_WIND_SPEED_RANGE,
};

use crate::error::AppResult;
use crate::services::advisory::{Location, ReadingProvider};

/// Random reading generator.
///
/// Readings are whole numbers inside fixed plausible ranges. The UV index is
/// never marked as measured.
pub struct SyntheticSource {
    rng: Mutex<StdRng>,
}

impl SyntheticSource {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible generator
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn generate(&self) -> RawReading {
        // a poisoned lock still holds a usable generator
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let rng = &mut *rng;

        RawReading {
            temperature: Some(Decimal::from(rng.gen_range(SIM_TEMPERATURE_RANGE))),
            humidity: Some(Decimal::from(rng.gen_range(SIM_HUMIDITY_RANGE))),
            pressure: Some(Decimal::from(rng.gen_range(SIM_PRESSURE_RANGE))),
            wind_speed: Some(Decimal::from(rng.gen_range(SIM_WIND_SPEED_RANGE))),
            uv_index: Some(Decimal::from(rng.gen_range(SIM_UV_INDEX_RANGE))),
            uv_from_api: false,
            air_quality: Some(Decimal::from(rng.gen_range(SIM_AIR_QUALITY_RANGE))),
            condition: SIM_CONDITIONS.choose(rng).map(|c| c.to_string()),
        }
    }
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self::new()
    }
}

#[axum::async_trait]
impl ReadingProvider for SyntheticSource {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    async fn fetch(&self, _location: &Location) -> AppResult<RawReading> {
        Ok(self.generate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ops::Range;

    fn within(value: Option<Decimal>, range: Range<i64>) -> bool {
        value.is_some_and(|v| v >= Decimal::from(range.start) && v < Decimal::from(range.end))
    }

    #[test]
    fn test_values_within_ranges() {
        let source = SyntheticSource::with_seed(7);
        for _ in 0..200 {
            let raw = source.generate();
            assert!(within(raw.temperature, SIM_TEMPERATURE_RANGE));
            assert!(within(raw.humidity, SIM_HUMIDITY_RANGE));
            assert!(within(raw.pressure, SIM_PRESSURE_RANGE));
            assert!(within(raw.wind_speed, SIM_WIND_SPEED_RANGE));
            assert!(within(raw.uv_index, SIM_UV_INDEX_RANGE));
            assert!(within(raw.air_quality, SIM_AIR_QUALITY_RANGE));
            assert!(SIM_CONDITIONS.contains(&raw.condition.as_deref().unwrap()));
        }
    }

    #[test]
    fn test_uv_never_marked_measured() {
        let source = SyntheticSource::with_seed(1);
        assert!((0..50).all(|_| !source.generate().uv_from_api));
    }

    #[test]
    fn test_seeded_generators_agree() {
        let a = SyntheticSource::with_seed(42);
        let b = SyntheticSource::with_seed(42);
        assert_eq!(a.generate(), b.generate());
        assert_eq!(a.generate(), b.generate());
    }
}
