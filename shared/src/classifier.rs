//! Threshold classification of single metric values

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Category, Level, MetricId, Reading};
use crate::thresholds::{
    ThresholdTable, AQI_TABLE, HUMIDITY_TABLE, PRESSURE_TABLE, TEMPERATURE_TABLE, UV_TABLE,
    WIND_TABLE,
};
use crate::types::Language;

impl<C: Level> ThresholdTable<C> {
    /// Category of a present value: the first band whose inclusive upper
    /// bound is >= value, otherwise the ceiling
    pub fn classify_value(&self, value: Decimal) -> C {
        self.bands
            .iter()
            .find(|band| value <= band.upper)
            .map(|band| band.category)
            .unwrap_or(self.ceiling)
    }

    /// Category of an optional value; absence stays absence
    pub fn classify(&self, value: Option<Decimal>) -> Option<C> {
        value.map(|v| self.classify_value(v))
    }
}

/// Classify one metric value. An absent value is `Category::Unknown`.
pub fn classify(metric: MetricId, value: Option<Decimal>) -> Category {
    let category = match metric {
        MetricId::UvIndex => UV_TABLE.classify(value).map(Category::Uv),
        MetricId::AirQuality => AQI_TABLE.classify(value).map(Category::AirQuality),
        MetricId::Temperature => TEMPERATURE_TABLE.classify(value).map(Category::Temperature),
        MetricId::Humidity => HUMIDITY_TABLE.classify(value).map(Category::Humidity),
        MetricId::Pressure => PRESSURE_TABLE.classify(value).map(Category::Pressure),
        MetricId::WindSpeed => WIND_TABLE.classify(value).map(Category::Wind),
    };
    category.unwrap_or(Category::Unknown)
}

/// Categories for every metric of a reading
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReadingCategories {
    pub temperature: Category,
    pub humidity: Category,
    pub pressure: Category,
    pub wind_speed: Category,
    pub uv_index: Category,
    pub air_quality: Category,
}

pub fn classify_reading(reading: &Reading) -> ReadingCategories {
    ReadingCategories {
        temperature: classify(MetricId::Temperature, reading.temperature),
        humidity: classify(MetricId::Humidity, reading.humidity),
        pressure: classify(MetricId::Pressure, reading.pressure),
        wind_speed: classify(MetricId::WindSpeed, reading.wind_speed),
        uv_index: classify(MetricId::UvIndex, reading.uv_index),
        air_quality: classify(MetricId::AirQuality, reading.air_quality),
    }
}

/// Portuguese UV level label ("Desconhecido" when absent)
pub fn uv_description(uv_index: Option<Decimal>) -> &'static str {
    classify(MetricId::UvIndex, uv_index).label(Language::Portuguese)
}

/// Portuguese air quality label ("Desconhecido" when absent)
pub fn air_quality_description(aqi: Option<Decimal>) -> &'static str {
    classify(MetricId::AirQuality, aqi).label(Language::Portuguese)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AqiLevel, HumidityLevel, PressureLevel, TemperatureLevel, UvLevel, WindLevel};

    fn d(s: &str) -> Option<Decimal> {
        Some(s.parse().unwrap())
    }

    #[test]
    fn test_absent_value_is_unknown() {
        for metric in MetricId::ALL {
            assert_eq!(classify(metric, None), Category::Unknown);
        }
    }

    #[test]
    fn test_uv_categories() {
        assert_eq!(classify(MetricId::UvIndex, d("0")), Category::Uv(UvLevel::Low));
        assert_eq!(classify(MetricId::UvIndex, d("2")), Category::Uv(UvLevel::Low));
        assert_eq!(classify(MetricId::UvIndex, d("2.1")), Category::Uv(UvLevel::Moderate));
        assert_eq!(classify(MetricId::UvIndex, d("7")), Category::Uv(UvLevel::High));
        assert_eq!(classify(MetricId::UvIndex, d("10")), Category::Uv(UvLevel::VeryHigh));
        assert_eq!(classify(MetricId::UvIndex, d("11")), Category::Uv(UvLevel::Extreme));
    }

    #[test]
    fn test_aqi_boundary_inclusive() {
        assert_eq!(
            classify(MetricId::AirQuality, d("150")),
            Category::AirQuality(AqiLevel::UnhealthyForSensitive)
        );
        assert_eq!(
            classify(MetricId::AirQuality, d("151")),
            Category::AirQuality(AqiLevel::Unhealthy)
        );
        assert_eq!(
            classify(MetricId::AirQuality, d("500")),
            Category::AirQuality(AqiLevel::Hazardous)
        );
    }

    #[test]
    fn test_other_metrics() {
        assert_eq!(
            classify(MetricId::Temperature, d("29")),
            Category::Temperature(TemperatureLevel::Hot)
        );
        assert_eq!(
            classify(MetricId::Humidity, d("79")),
            Category::Humidity(HumidityLevel::High)
        );
        assert_eq!(
            classify(MetricId::Pressure, d("1008")),
            Category::Pressure(PressureLevel::Low)
        );
        assert_eq!(
            classify(MetricId::WindSpeed, d("35")),
            Category::Wind(WindLevel::VeryStrong)
        );
    }

    #[test]
    fn test_negative_values_take_lowest_band() {
        assert_eq!(
            classify(MetricId::Temperature, d("-12")),
            Category::Temperature(TemperatureLevel::Comfortable)
        );
        assert_eq!(classify(MetricId::UvIndex, d("-1")), Category::Uv(UvLevel::Low));
    }

    #[test]
    fn test_classify_reading() {
        let reading = Reading {
            temperature: d("29"),
            humidity: None,
            pressure: d("1015"),
            wind_speed: d("12"),
            uv_index: d("9"),
            uv_from_api: true,
            air_quality: d("91"),
            condition: "Nublado".to_string(),
        };

        let categories = classify_reading(&reading);
        assert_eq!(categories.temperature, Category::Temperature(TemperatureLevel::Hot));
        assert_eq!(categories.humidity, Category::Unknown);
        assert_eq!(categories.pressure, Category::Pressure(PressureLevel::Normal));
        assert_eq!(categories.wind_speed, Category::Wind(WindLevel::Light));
        assert_eq!(categories.uv_index, Category::Uv(UvLevel::VeryHigh));
        assert_eq!(categories.air_quality, Category::AirQuality(AqiLevel::Moderate));
    }

    #[test]
    fn test_portuguese_descriptions() {
        assert_eq!(uv_description(None), "Desconhecido");
        assert_eq!(uv_description(d("6")), "Alto");
        assert_eq!(air_quality_description(d("40")), "Bom");
        assert_eq!(air_quality_description(d("250")), "Muito Ruim");
    }
}
