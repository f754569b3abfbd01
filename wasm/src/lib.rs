//! WebAssembly module for the NimbusVita advisory
//!
//! Provides client-side computation for:
//! - Metric classification
//! - Reading normalization
//! - Risk assessment with alerts
//! - Cache staleness checks
//!
//! Structured values cross the boundary as JSON strings.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use shared::{
    aggregator, air_quality_description, body_system_impacts, check_plausibility, classify,
    classify_reading, derive_alerts, factors, normalize, symptom_factor, uv_description, Alert,
    BodySystemImpact, Language, MetricId, PlausibilityIssue, RawReading, Reading,
    ReadingCategories, RiskAnalysis, RiskFactor,
};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("nimbus advisory module loaded"));
}

// ============================================================================
// Classification
// ============================================================================

#[derive(Serialize)]
struct Classification {
    metric: &'static str,
    rank: Option<u8>,
    label: &'static str,
}

fn classify_json(metric: &str, value: Option<f64>, lang: &str) -> Result<String, String> {
    let metric: MetricId = metric.parse()?;
    // NaN and infinities have no decimal form and classify as unknown
    let value = value.and_then(|v| Decimal::try_from(v).ok());
    let category = classify(metric, value);

    let out = Classification {
        metric: metric.as_str(),
        rank: category.rank(),
        label: category.label(Language::from_code(lang)),
    };
    serde_json::to_string(&out).map_err(|e| e.to_string())
}

/// Classify a single metric value, returning `{metric, rank, label}` as JSON
#[wasm_bindgen]
pub fn classify_metric(metric: &str, value: Option<f64>, lang: &str) -> Result<String, JsValue> {
    classify_json(metric, value, lang).map_err(|e| JsValue::from_str(&e))
}

/// Portuguese UV label for the given index
#[wasm_bindgen]
pub fn describe_uv(uv_index: Option<f64>) -> String {
    uv_description(uv_index.and_then(|v| Decimal::try_from(v).ok())).to_string()
}

/// Portuguese air quality label for the given AQI
#[wasm_bindgen]
pub fn describe_air_quality(aqi: Option<f64>) -> String {
    air_quality_description(aqi.and_then(|v| Decimal::try_from(v).ok())).to_string()
}

// ============================================================================
// Normalization
// ============================================================================

fn normalize_json(raw_json: &str) -> Result<String, String> {
    let raw: RawReading =
        serde_json::from_str(raw_json).map_err(|e| format!("Invalid reading JSON: {}", e))?;
    serde_json::to_string(&normalize(&raw)).map_err(|e| e.to_string())
}

/// Normalize a raw reading into its canonical form
#[wasm_bindgen]
pub fn normalize_reading(raw_json: &str) -> Result<String, JsValue> {
    normalize_json(raw_json).map_err(|e| JsValue::from_str(&e))
}

// ============================================================================
// Risk assessment
// ============================================================================

#[derive(Deserialize)]
struct Symptom {
    name: String,
    probability: Decimal,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Assessment {
    reading: Reading,
    categories: ReadingCategories,
    analysis: RiskAnalysis,
    body_systems: Vec<BodySystemImpact>,
    alerts: Vec<Alert>,
    plausibility_issues: Vec<PlausibilityIssue>,
}

fn assess_json(raw_json: &str, symptoms_json: &str) -> Result<String, String> {
    let raw: RawReading =
        serde_json::from_str(raw_json).map_err(|e| format!("Invalid reading JSON: {}", e))?;
    let symptoms: Vec<Symptom> = if symptoms_json.trim().is_empty() {
        Vec::new()
    } else {
        serde_json::from_str(symptoms_json)
            .map_err(|e| format!("Invalid symptoms JSON: {}", e))?
    };

    let extra = symptoms
        .into_iter()
        .map(|s| {
            if s.probability < Decimal::ZERO || s.probability > Decimal::ONE {
                return Err(format!("Probability for '{}' must be between 0 and 1", s.name));
            }
            Ok(symptom_factor(s.name, s.probability))
        })
        .collect::<Result<Vec<RiskFactor>, String>>()?;

    let reading = normalize(&raw);
    let analysis = factors::assess(&reading, &extra);
    let out = Assessment {
        categories: classify_reading(&reading),
        body_systems: body_system_impacts(&reading),
        alerts: derive_alerts(&analysis),
        plausibility_issues: check_plausibility(&reading),
        analysis,
        reading,
    };
    serde_json::to_string(&out).map_err(|e| e.to_string())
}

/// Assess a raw reading plus optional symptom signals (`[{name, probability}]`)
#[wasm_bindgen]
pub fn assess_reading(raw_json: &str, symptoms_json: &str) -> Result<String, JsValue> {
    assess_json(raw_json, symptoms_json).map_err(|e| JsValue::from_str(&e))
}

/// Risk score for an already built factor list
#[wasm_bindgen]
pub fn score_factors(factors_json: &str) -> Result<u8, JsValue> {
    let factors: Vec<RiskFactor> = serde_json::from_str(factors_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid factors JSON: {}", e)))?;
    Ok(aggregator::risk_score(&factors))
}

// ============================================================================
// Staleness
// ============================================================================

fn parse_instant(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("Invalid timestamp '{}': {}", value, e))
}

fn is_stale_rfc3339(last_update: &str, now: Option<String>) -> Result<bool, String> {
    let last_update = parse_instant(last_update)?;
    let now = now.as_deref().map(parse_instant).transpose()?;
    Ok(shared::is_stale(last_update, now))
}

/// Whether a cached reading captured at `last_update` (RFC 3339) has expired
#[wasm_bindgen]
pub fn is_reading_stale(last_update: &str, now: Option<String>) -> Result<bool, JsValue> {
    is_stale_rfc3339(last_update, now).map_err(|e| JsValue::from_str(&e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_classify_metric_labels() {
        let out: Value = serde_json::from_str(&classify_json("uv_index", Some(11.0), "pt").unwrap()).unwrap();
        assert_eq!(out["label"], "Extremo");
        assert_eq!(out["rank"], 4);

        let out: Value = serde_json::from_str(&classify_json("air_quality", Some(150.0), "en").unwrap()).unwrap();
        assert_eq!(out["metric"], "air_quality");
        assert_eq!(out["rank"], 2);
    }

    #[test]
    fn test_classify_absent_and_nan() {
        for value in [None, Some(f64::NAN)] {
            let out: Value = serde_json::from_str(&classify_json("humidity", value, "pt").unwrap()).unwrap();
            assert!(out["rank"].is_null());
            assert_eq!(out["label"], "Desconhecido");
        }
    }

    #[test]
    fn test_classify_unknown_metric() {
        assert!(classify_json("visibility", Some(1.0), "en").is_err());
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(describe_uv(Some(0.0)), "Baixo");
        assert_eq!(describe_uv(None), "Desconhecido");
        assert_eq!(describe_air_quality(Some(350.0)), "Perigoso");
    }

    #[test]
    fn test_normalize_rounds_temperature() {
        let out: Value =
            serde_json::from_str(&normalize_json(r#"{"temperature": 28.6, "condition": "  "}"#).unwrap())
                .unwrap();
        assert_eq!(out["temperature"], "29");
        assert_eq!(out["condition"], "—");
        assert!(normalize_json("not json").is_err());
    }

    #[test]
    fn test_assess_with_symptoms() {
        let raw = r#"{"temperature": 24, "humidity": 50, "pressure": 1015, "windSpeed": 5, "airQuality": 40}"#;
        let out: Value =
            serde_json::from_str(&assess_json(raw, r#"[{"name": "dengue", "probability": 0.9}]"#).unwrap())
                .unwrap();
        assert_eq!(out["analysis"]["overallRisk"], "critical");
        assert_eq!(out["alerts"].as_array().unwrap().len(), 1);
        assert_eq!(out["bodySystems"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_assess_rejects_out_of_range_probability() {
        let err = assess_json("{}", r#"[{"name": "flu", "probability": 1.5}]"#).unwrap_err();
        assert!(err.contains("flu"));
    }

    #[test]
    fn test_assess_without_symptoms() {
        let out: Value = serde_json::from_str(&assess_json("{}", "").unwrap()).unwrap();
        assert_eq!(out["analysis"]["riskScore"], 0);
        assert_eq!(out["analysis"]["overallRisk"], "low");
    }

    #[test]
    fn test_staleness() {
        assert!(is_stale_rfc3339("2024-05-01T10:00:00Z", Some("2024-05-01T11:00:01Z".into())).unwrap());
        assert!(!is_stale_rfc3339("2024-05-01T10:00:00Z", Some("2024-05-01T11:00:00Z".into())).unwrap());
        assert!(is_stale_rfc3339("yesterday", None).is_err());
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_classify_metric_rejects_unknown_metric() {
        assert!(classify_metric("visibility", Some(1.0), "en").is_err());
    }
}
