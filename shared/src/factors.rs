//! Risk factor construction from readings and external health signals

use rust_decimal::Decimal;

use crate::aggregator::aggregate;
use crate::classifier::classify;
use crate::models::{
    AqiLevel, BodySystem, BodySystemImpact, Category, FactorKind, FactorValue, HumidityLevel,
    MetricId, PressureLevel, Reading, RiskAnalysis, RiskFactor, Severity, TemperatureLevel,
    UvLevel, WindLevel,
};
use crate::thresholds::{
    CARDIO_COLD_BELOW, CARDIO_HEAT_ABOVE, HEAVILY_POLLUTED_AIR_ABOVE, HUMID_AIR_ABOVE,
    DRY_AIR_BELOW, INTENSE_COLD_BELOW, LOW_PRESSURE_BELOW, NEURO_UV_ABOVE, POLLUTED_AIR_ABOVE,
    SIGNAL_TABLE, VERY_LOW_PRESSURE_BELOW,
};
use crate::types::Language;

// ============================================================================
// Weather Factors
// ============================================================================

/// Health severity of a classified category. `Unknown` has none.
pub fn category_severity(category: Category) -> Option<Severity> {
    let severity = match category {
        Category::Unknown => return None,
        Category::Temperature(level) => match level {
            TemperatureLevel::Comfortable => Severity::Low,
            TemperatureLevel::Warm => Severity::Moderate,
            TemperatureLevel::Hot => Severity::High,
            TemperatureLevel::VeryHot => Severity::Critical,
        },
        Category::Humidity(level) => match level {
            HumidityLevel::Normal => Severity::Low,
            HumidityLevel::Elevated => Severity::Moderate,
            HumidityLevel::High | HumidityLevel::VeryHigh => Severity::High,
        },
        // low pressure is the harmful end
        Category::Pressure(level) => match level {
            PressureLevel::VeryLow => Severity::High,
            PressureLevel::Low => Severity::Moderate,
            PressureLevel::Normal | PressureLevel::High => Severity::Low,
        },
        Category::Wind(level) => match level {
            WindLevel::Calm | WindLevel::Light => Severity::Low,
            WindLevel::Strong => Severity::Moderate,
            WindLevel::VeryStrong => Severity::High,
        },
        Category::Uv(level) => match level {
            UvLevel::Low | UvLevel::Moderate => Severity::Low,
            UvLevel::High => Severity::Moderate,
            UvLevel::VeryHigh => Severity::High,
            UvLevel::Extreme => Severity::Critical,
        },
        Category::AirQuality(level) => match level {
            AqiLevel::Good | AqiLevel::Moderate => Severity::Low,
            AqiLevel::UnhealthyForSensitive => Severity::Moderate,
            AqiLevel::Unhealthy => Severity::High,
            AqiLevel::VeryUnhealthy | AqiLevel::Hazardous => Severity::Critical,
        },
    };
    Some(severity)
}

fn metric_factor(metric: MetricId) -> (FactorKind, &'static str) {
    match metric {
        MetricId::Temperature => (FactorKind::Temperature, "Temperature"),
        MetricId::Humidity => (FactorKind::Humidity, "Humidity"),
        MetricId::Pressure => (FactorKind::Pressure, "Pressure"),
        MetricId::WindSpeed => (FactorKind::Wind, "Wind Speed"),
        MetricId::UvIndex => (FactorKind::UvIndex, "UV Index"),
        MetricId::AirQuality => (FactorKind::AirQuality, "Air Quality"),
    }
}

/// Low-side rule for a metric: intense cold and dry air are harmful even
/// though their categories sit at the bottom of the scale.
fn low_side_factor(metric: MetricId, value: Decimal) -> Option<(FactorKind, &'static str)> {
    match metric {
        MetricId::Temperature if below(Some(value), INTENSE_COLD_BELOW) => {
            Some((FactorKind::Cold, "Intense cold"))
        }
        MetricId::Humidity if below(Some(value), DRY_AIR_BELOW) => {
            Some((FactorKind::DryAir, "Dry air"))
        }
        _ => None,
    }
}

/// One factor per present metric.
///
/// A UV index that was not measured by a live source is left out. A reading
/// under a low-side limit gives a `Cold` or `DryAir` factor of at least
/// moderate severity in place of its plain metric factor.
pub fn weather_factors(reading: &Reading) -> Vec<RiskFactor> {
    MetricId::ALL
        .into_iter()
        .filter(|metric| *metric != MetricId::UvIndex || reading.uv_from_api)
        .filter_map(|metric| {
            let value = reading.value(metric)?;
            let category = classify(metric, Some(value));
            let severity = category_severity(category)?;
            let (kind, name) = metric_factor(metric);

            let factor = match low_side_factor(metric, value) {
                Some((low_kind, description)) => RiskFactor::new(
                    low_kind,
                    name,
                    FactorValue::Number(value),
                    severity.max(Severity::Moderate),
                )
                .with_description(description),
                None => RiskFactor::new(kind, name, FactorValue::Number(value), severity)
                    .with_description(category.label(Language::English)),
            };
            Some(factor)
        })
        .collect()
}

/// Factor for an external health signal with a probability in 0..1
pub fn symptom_factor(name: impl Into<String>, probability: Decimal) -> RiskFactor {
    let severity = SIGNAL_TABLE.classify_value(probability);
    let percent = (probability * Decimal::ONE_HUNDRED).round_dp(0);
    RiskFactor::new(
        FactorKind::Symptom,
        name,
        FactorValue::Number(probability),
        severity,
    )
    .with_description(format!("{}% probability", percent))
}

/// Weather factors of the reading followed by `extra`, aggregated
pub fn assess(reading: &Reading, extra: &[RiskFactor]) -> RiskAnalysis {
    let mut factors = weather_factors(reading);
    factors.extend_from_slice(extra);
    aggregate(&factors)
}

// ============================================================================
// Body System Impacts
// ============================================================================

fn above(value: Option<Decimal>, limit: u32) -> bool {
    value.is_some_and(|v| v > Decimal::from(limit))
}

fn below(value: Option<Decimal>, limit: u32) -> bool {
    value.is_some_and(|v| v < Decimal::from(limit))
}

fn impact(system: BodySystem, level: Severity, reason: &str, reason_pt: &str) -> BodySystemImpact {
    BodySystemImpact {
        system,
        level,
        reason: reason.to_string(),
        reason_pt: reason_pt.to_string(),
    }
}

/// Expected impact of the reading on each body system.
///
/// Rules are checked in order and the first match wins.
pub fn body_system_impacts(reading: &Reading) -> Vec<BodySystemImpact> {
    let cardiovascular = if above(reading.temperature, CARDIO_HEAT_ABOVE) {
        impact(BodySystem::Cardiovascular, Severity::High, "Excessive heat", "Calor excessivo")
    } else if below(reading.temperature, CARDIO_COLD_BELOW) {
        impact(BodySystem::Cardiovascular, Severity::High, "Intense cold", "Frio intenso")
    } else if below(reading.pressure, LOW_PRESSURE_BELOW) {
        impact(BodySystem::Cardiovascular, Severity::Moderate, "Low pressure", "Pressão baixa")
    } else {
        impact(BodySystem::Cardiovascular, Severity::Low, "Normal conditions", "Condições normais")
    };

    let respiratory = if above(reading.air_quality, HEAVILY_POLLUTED_AIR_ABOVE) {
        impact(BodySystem::Respiratory, Severity::High, "Heavily polluted air", "Ar muito poluído")
    } else if above(reading.air_quality, POLLUTED_AIR_ABOVE) {
        impact(BodySystem::Respiratory, Severity::High, "Polluted air", "Ar poluído")
    } else if above(reading.humidity, HUMID_AIR_ABOVE) {
        impact(BodySystem::Respiratory, Severity::Moderate, "High humidity", "Umidade alta")
    } else {
        impact(BodySystem::Respiratory, Severity::Low, "Clean air", "Ar limpo")
    };

    let neurological = if below(reading.pressure, VERY_LOW_PRESSURE_BELOW) {
        impact(BodySystem::Neurological, Severity::High, "Very low pressure", "Pressão muito baixa")
    } else if below(reading.pressure, LOW_PRESSURE_BELOW) {
        impact(BodySystem::Neurological, Severity::Moderate, "Low pressure", "Pressão baixa")
    } else if above(reading.uv_index, NEURO_UV_ABOVE) {
        impact(BodySystem::Neurological, Severity::Moderate, "High UV", "UV elevado")
    } else {
        impact(BodySystem::Neurological, Severity::Low, "No changes", "Sem alterações")
    };

    vec![cardiovascular, respiratory, neurological]
}
