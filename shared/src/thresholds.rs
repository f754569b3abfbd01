//! Threshold tables and platform-wide constants
//!
//! Each metric is described by an ascending list of inclusive upper bounds
//! and the category that applies up to that bound. Values above the last
//! bound fall into the table's ceiling category, so every table covers the
//! whole number line without gaps.

use rust_decimal::Decimal;

use crate::models::{
    AqiLevel, HumidityLevel, Level, PressureLevel, Severity, TemperatureLevel, UvLevel, WindLevel,
};
use crate::validation::ThresholdError;

/// One step of a threshold table: values `<= upper` map to `category`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band<C> {
    pub upper: Decimal,
    pub category: C,
}

/// Ordered boundary definitions for one metric
#[derive(Debug, Clone, Copy)]
pub struct ThresholdTable<C: 'static> {
    pub metric: &'static str,
    pub bands: &'static [Band<C>],
    /// Category for values above the last band
    pub ceiling: C,
}

impl<C: Level> ThresholdTable<C> {
    /// Check bounds are strictly increasing and categories strictly ascend to the ceiling
    pub fn validate(&self) -> Result<(), ThresholdError> {
        let Some(last) = self.bands.last() else {
            return Err(ThresholdError::EmptyTable {
                metric: self.metric,
            });
        };

        for (index, pair) in self.bands.windows(2).enumerate() {
            if pair[1].upper <= pair[0].upper {
                return Err(ThresholdError::UnorderedBounds {
                    metric: self.metric,
                    index: index + 1,
                    previous: pair[0].upper,
                    bound: pair[1].upper,
                });
            }
            if pair[1].category.rank() <= pair[0].category.rank() {
                return Err(ThresholdError::UnorderedCategories {
                    metric: self.metric,
                    index: index + 1,
                });
            }
        }

        if self.ceiling.rank() <= last.category.rank() {
            return Err(ThresholdError::UnorderedCategories {
                metric: self.metric,
                index: self.bands.len(),
            });
        }

        Ok(())
    }

    pub fn bounds(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.bands.iter().map(|b| b.upper)
    }
}

const fn bound(value: u32) -> Decimal {
    Decimal::from_parts(value, 0, 0, false, 0)
}

const fn band<C>(upper: u32, category: C) -> Band<C> {
    Band {
        upper: bound(upper),
        category,
    }
}

/// Band with a fractional bound, `mantissa * 10^-scale`
const fn scaled_band<C>(mantissa: u32, scale: u32, category: C) -> Band<C> {
    Band {
        upper: Decimal::from_parts(mantissa, 0, 0, false, scale),
        category,
    }
}

// ============================================================================
// Metric Tables
// ============================================================================

/// WHO Global Solar UV Index
pub const UV_TABLE: ThresholdTable<UvLevel> = ThresholdTable {
    metric: "uv_index",
    bands: &[
        band(2, UvLevel::Low),
        band(5, UvLevel::Moderate),
        band(7, UvLevel::High),
        band(10, UvLevel::VeryHigh),
    ],
    ceiling: UvLevel::Extreme,
};

/// EPA Air Quality Index
pub const AQI_TABLE: ThresholdTable<AqiLevel> = ThresholdTable {
    metric: "air_quality",
    bands: &[
        band(50, AqiLevel::Good),
        band(100, AqiLevel::Moderate),
        band(150, AqiLevel::UnhealthyForSensitive),
        band(200, AqiLevel::Unhealthy),
        band(300, AqiLevel::VeryUnhealthy),
    ],
    ceiling: AqiLevel::Hazardous,
};

/// Air temperature, °C
pub const TEMPERATURE_TABLE: ThresholdTable<TemperatureLevel> = ThresholdTable {
    metric: "temperature",
    bands: &[
        band(24, TemperatureLevel::Comfortable),
        band(28, TemperatureLevel::Warm),
        band(32, TemperatureLevel::Hot),
    ],
    ceiling: TemperatureLevel::VeryHot,
};

/// Relative humidity, %
pub const HUMIDITY_TABLE: ThresholdTable<HumidityLevel> = ThresholdTable {
    metric: "humidity",
    bands: &[
        band(65, HumidityLevel::Normal),
        band(75, HumidityLevel::Elevated),
        band(85, HumidityLevel::High),
    ],
    ceiling: HumidityLevel::VeryHigh,
};

/// Atmospheric pressure, hPa
pub const PRESSURE_TABLE: ThresholdTable<PressureLevel> = ThresholdTable {
    metric: "pressure",
    bands: &[
        band(1000, PressureLevel::VeryLow),
        band(1013, PressureLevel::Low),
        band(1020, PressureLevel::Normal),
    ],
    ceiling: PressureLevel::High,
};

/// Wind speed, km/h
pub const WIND_TABLE: ThresholdTable<WindLevel> = ThresholdTable {
    metric: "wind_speed",
    bands: &[
        band(10, WindLevel::Calm),
        band(20, WindLevel::Light),
        band(30, WindLevel::Strong),
    ],
    ceiling: WindLevel::VeryStrong,
};

/// Aggregate risk score (0-100) to overall risk level
pub const RISK_TABLE: ThresholdTable<Severity> = ThresholdTable {
    metric: "risk_score",
    bands: &[
        band(29, Severity::Low),
        band(59, Severity::Moderate),
        band(79, Severity::High),
    ],
    ceiling: Severity::Critical,
};

/// Probability (0-1) of an external health signal to severity
pub const SIGNAL_TABLE: ThresholdTable<Severity> = ThresholdTable {
    metric: "signal_probability",
    bands: &[
        scaled_band(25, 2, Severity::Low),
        scaled_band(5, 1, Severity::Moderate),
        scaled_band(75, 2, Severity::High),
    ],
    ceiling: Severity::Critical,
};

// ============================================================================
// Risk Scoring
// ============================================================================

pub const TIER_WEIGHT_LOW: u32 = 0;
pub const TIER_WEIGHT_MODERATE: u32 = 15;
pub const TIER_WEIGHT_HIGH: u32 = 30;
pub const TIER_WEIGHT_CRITICAL: u32 = 50;

/// Minimum score once any critical factor is present (lower edge of the critical band)
pub const CRITICAL_SCORE_FLOOR: u32 = 80;

pub const MAX_RISK_SCORE: u32 = 100;

// ============================================================================
// Body System Rules
// ============================================================================

pub const CARDIO_HEAT_ABOVE: u32 = 28;
pub const CARDIO_COLD_BELOW: u32 = 18;
pub const LOW_PRESSURE_BELOW: u32 = 1010;
pub const VERY_LOW_PRESSURE_BELOW: u32 = 1000;
pub const POLLUTED_AIR_ABOVE: u32 = 100;
pub const HEAVILY_POLLUTED_AIR_ABOVE: u32 = 150;
pub const HUMID_AIR_ABOVE: u32 = 70;
pub const NEURO_UV_ABOVE: u32 = 8;

// ============================================================================
// Low-Side Weather Rules
// ============================================================================

/// Below this temperature (°C) the temperature factor counts as intense cold
pub const INTENSE_COLD_BELOW: u32 = 18;

/// Below this relative humidity (%) the humidity factor counts as dry air
pub const DRY_AIR_BELOW: u32 = 40;

// ============================================================================
// Staleness
// ============================================================================

/// Cached readings are valid for one hour
pub const CACHE_VALIDITY_SECONDS: i64 = 60 * 60;

// ============================================================================
// External Source Mapping
// ============================================================================

/// OpenWeather reports air quality on a 1..5 scale
pub const OPENWEATHER_AQI_SCALE: [(u8, u32); 5] = [(1, 50), (2, 100), (3, 150), (4, 200), (5, 300)];

/// AQI assumed when OpenWeather returns an index outside 1..5
pub const OPENWEATHER_AQI_FALLBACK: u32 = 100;

/// Map an OpenWeather 1..5 air quality index onto the AQI scale
pub fn map_openweather_aqi(index: u8) -> Decimal {
    let value = OPENWEATHER_AQI_SCALE
        .iter()
        .find(|(i, _)| *i == index)
        .map(|(_, aqi)| *aqi)
        .unwrap_or(OPENWEATHER_AQI_FALLBACK);
    Decimal::from(value)
}

// ============================================================================
// Synthetic Data Ranges (half-open, used by the fallback generator)
// ============================================================================

pub const SIM_TEMPERATURE_RANGE: std::ops::Range<i64> = 15..35;
pub const SIM_HUMIDITY_RANGE: std::ops::Range<i64> = 50..100;
pub const SIM_PRESSURE_RANGE: std::ops::Range<i64> = 980..1060;
pub const SIM_WIND_SPEED_RANGE: std::ops::Range<i64> = 5..40;
pub const SIM_UV_INDEX_RANGE: std::ops::Range<i64> = 1..13;
pub const SIM_AIR_QUALITY_RANGE: std::ops::Range<i64> = 30..180;

pub const SIM_CONDITIONS: &[&str] = &[
    "Nublado",
    "Ensolarado",
    "Parcialmente Nublado",
    "Chuvoso",
    "Tempestade",
];

// ============================================================================
// Plausibility Limits (inclusive)
// ============================================================================

pub const PLAUSIBLE_TEMPERATURE: (i64, i64) = (-90, 60);
pub const PLAUSIBLE_HUMIDITY: (i64, i64) = (0, 100);
pub const PLAUSIBLE_PRESSURE: (i64, i64) = (850, 1090);
pub const PLAUSIBLE_WIND_SPEED: (i64, i64) = (0, 410);
pub const PLAUSIBLE_UV_INDEX: (i64, i64) = (0, 20);
pub const PLAUSIBLE_AIR_QUALITY: (i64, i64) = (0, 500);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tables_valid() {
        assert!(UV_TABLE.validate().is_ok());
        assert!(AQI_TABLE.validate().is_ok());
        assert!(TEMPERATURE_TABLE.validate().is_ok());
        assert!(HUMIDITY_TABLE.validate().is_ok());
        assert!(PRESSURE_TABLE.validate().is_ok());
        assert!(WIND_TABLE.validate().is_ok());
        assert!(RISK_TABLE.validate().is_ok());
        assert!(SIGNAL_TABLE.validate().is_ok());
    }

    #[test]
    fn test_const_bounds() {
        let uv: Vec<Decimal> = UV_TABLE.bounds().collect();
        assert_eq!(
            uv,
            vec![Decimal::from(2), Decimal::from(5), Decimal::from(7), Decimal::from(10)]
        );

        let signal: Vec<String> = SIGNAL_TABLE.bounds().map(|b| b.to_string()).collect();
        assert_eq!(signal, vec!["0.25", "0.5", "0.75"]);
    }

    #[test]
    fn test_unordered_bounds_rejected() {
        static BANDS: [Band<UvLevel>; 2] = [band(5, UvLevel::Low), band(2, UvLevel::Moderate)];
        let table = ThresholdTable {
            metric: "broken",
            bands: &BANDS,
            ceiling: UvLevel::High,
        };
        assert!(matches!(
            table.validate(),
            Err(ThresholdError::UnorderedBounds { index: 1, .. })
        ));
    }

    #[test]
    fn test_duplicate_bounds_rejected() {
        static BANDS: [Band<UvLevel>; 2] = [band(5, UvLevel::Low), band(5, UvLevel::Moderate)];
        let table = ThresholdTable {
            metric: "duplicate",
            bands: &BANDS,
            ceiling: UvLevel::High,
        };
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_unordered_categories_rejected() {
        static BANDS: [Band<UvLevel>; 2] = [band(2, UvLevel::High), band(5, UvLevel::Low)];
        let table = ThresholdTable {
            metric: "categories",
            bands: &BANDS,
            ceiling: UvLevel::Extreme,
        };
        assert!(matches!(
            table.validate(),
            Err(ThresholdError::UnorderedCategories { .. })
        ));
    }

    #[test]
    fn test_ceiling_must_exceed_last_band() {
        static BANDS: [Band<UvLevel>; 1] = [band(2, UvLevel::High)];
        let table = ThresholdTable {
            metric: "ceiling",
            bands: &BANDS,
            ceiling: UvLevel::Low,
        };
        assert!(matches!(
            table.validate(),
            Err(ThresholdError::UnorderedCategories { index: 1, .. })
        ));
    }

    #[test]
    fn test_empty_table_rejected() {
        let table: ThresholdTable<UvLevel> = ThresholdTable {
            metric: "empty",
            bands: &[],
            ceiling: UvLevel::Low,
        };
        assert!(matches!(table.validate(), Err(ThresholdError::EmptyTable { .. })));
    }

    #[test]
    fn test_openweather_aqi_mapping() {
        assert_eq!(map_openweather_aqi(1), Decimal::from(50));
        assert_eq!(map_openweather_aqi(3), Decimal::from(150));
        assert_eq!(map_openweather_aqi(5), Decimal::from(300));
        assert_eq!(map_openweather_aqi(0), Decimal::from(100));
        assert_eq!(map_openweather_aqi(9), Decimal::from(100));
    }
}
