//! Tests for risk aggregation, recommendations, alerts and body system impacts

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{
    aggregate_at, assess, body_system_impacts, derive_alerts, overall_risk, risk_score,
    symptom_factor, weather_factors, AlertKind, AlertSeverity, BodySystem, FactorKind,
    FactorValue, Reading, RiskFactor, Severity,
};

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn reading(temp: &str, humidity: &str, pressure: &str, wind: &str, uv: &str, aqi: &str) -> Reading {
    Reading {
        temperature: Some(dec(temp)),
        humidity: Some(dec(humidity)),
        pressure: Some(dec(pressure)),
        wind_speed: Some(dec(wind)),
        uv_index: Some(dec(uv)),
        uv_from_api: true,
        air_quality: Some(dec(aqi)),
        condition: "Céu limpo".to_string(),
    }
}

fn factor(severity: Severity) -> RiskFactor {
    RiskFactor::new(
        FactorKind::Humidity,
        "Humidity",
        FactorValue::Number(Decimal::from(70)),
        severity,
    )
}

fn severity_strategy() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Low),
        Just(Severity::Moderate),
        Just(Severity::High),
        Just(Severity::Critical),
    ]
}

// =============================================================================
// Scenarios
// =============================================================================

mod scenarios {
    use super::*;

    #[test]
    fn mild_day_is_low_risk() {
        let day = reading("22", "55", "1016", "8", "4", "35");
        let analysis = assess(&day, &[]);

        assert_eq!(analysis.risk_score, 0);
        assert_eq!(analysis.overall_risk, Severity::Low);
        assert_eq!(analysis.factors.len(), 6);
        assert!(analysis.recommendations.is_empty());
        assert!(derive_alerts(&analysis).is_empty());
        assert!(body_system_impacts(&day)
            .iter()
            .all(|impact| impact.level == Severity::Low));
    }

    #[test]
    fn heatwave_is_critical() {
        let day = reading("34", "80", "1012", "5", "11", "40");
        let analysis = assess(&day, &[]);

        assert_eq!(analysis.risk_score, 100);
        assert_eq!(analysis.overall_risk, Severity::Critical);
        // extreme heat advice comes before the moderate pressure advice
        assert!(analysis.recommendations[0].starts_with("Extreme heat"));
        assert_eq!(analysis.recommendations.len(), analysis.recommendations_pt.len());

        let alerts = derive_alerts(&analysis);
        let severities: Vec<AlertSeverity> = alerts.iter().map(|a| a.severity).collect();
        assert_eq!(
            severities,
            vec![
                AlertSeverity::Danger,
                AlertSeverity::Warning,
                AlertSeverity::Info,
                AlertSeverity::Danger,
            ]
        );
        assert_eq!(alerts[3].kind, AlertKind::UvIndex);
    }

    #[test]
    fn heatwave_body_systems() {
        let impacts = body_system_impacts(&reading("34", "80", "1012", "5", "11", "40"));
        let systems: Vec<BodySystem> = impacts.iter().map(|i| i.system).collect();
        assert_eq!(
            systems,
            vec![BodySystem::Cardiovascular, BodySystem::Respiratory, BodySystem::Neurological]
        );
        assert_eq!(impacts[0].level, Severity::High);
        assert_eq!(impacts[0].reason, "Excessive heat");
        assert_eq!(impacts[1].level, Severity::Moderate);
        assert_eq!(impacts[1].reason_pt, "Umidade alta");
        assert_eq!(impacts[2].reason, "High UV");
    }

    #[test]
    fn freezing_dry_day_is_moderate_with_cold_advice() {
        let day = reading("-5", "30", "1016", "8", "4", "35");
        let analysis = assess(&day, &[]);

        assert_eq!(analysis.risk_score, 30);
        assert_eq!(analysis.overall_risk, Severity::Moderate);
        assert!(analysis
            .recommendations_pt
            .contains(&"Frio Intenso: Vista roupas adequadas e proteja extremidades do corpo".to_string()));
        assert_eq!(analysis.recommendations.len(), 2);

        let alerts = derive_alerts(&analysis);
        assert_eq!(alerts.len(), 2);
        assert!(alerts.iter().all(|a| a.kind == AlertKind::Weather));
        assert!(alerts.iter().all(|a| a.severity == AlertSeverity::Info));
    }

    #[test]
    fn estimated_uv_does_not_raise_risk() {
        let mut day = reading("22", "55", "1016", "8", "11", "35");
        day.uv_from_api = false;
        assert_eq!(weather_factors(&day).len(), 5);
        assert_eq!(assess(&day, &[]).overall_risk, Severity::Low);
    }

    #[test]
    fn symptom_signal_joins_weather_factors() {
        let day = reading("22", "55", "1016", "8", "4", "35");
        let analysis = assess(&day, &[symptom_factor("Dengue", dec("0.6"))]);

        assert_eq!(analysis.factors.len(), 7);
        assert_eq!(analysis.risk_score, 30);
        assert_eq!(analysis.overall_risk, Severity::Moderate);

        let alerts = derive_alerts(&analysis);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::Health);
    }
}

// =============================================================================
// Score Bands
// =============================================================================

mod score_bands {
    use super::*;

    #[test]
    fn band_edges() {
        assert_eq!(overall_risk(0), Severity::Low);
        assert_eq!(overall_risk(29), Severity::Low);
        assert_eq!(overall_risk(30), Severity::Moderate);
        assert_eq!(overall_risk(59), Severity::Moderate);
        assert_eq!(overall_risk(60), Severity::High);
        assert_eq!(overall_risk(79), Severity::High);
        assert_eq!(overall_risk(80), Severity::Critical);
        assert_eq!(overall_risk(100), Severity::Critical);
    }

    #[test]
    fn moderate_factors_accumulate() {
        let two = vec![factor(Severity::Moderate); 2];
        assert_eq!(risk_score(&two), 30);

        let four = vec![factor(Severity::Moderate); 4];
        assert_eq!(risk_score(&four), 60);
        let analysis = aggregate_at(&four, Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
        assert_eq!(analysis.overall_risk, Severity::High);
        // identical advice is listed once
        assert_eq!(analysis.recommendations.len(), 1);
    }

    #[test]
    fn single_critical_reaches_floor() {
        assert_eq!(risk_score(&[factor(Severity::Critical)]), 80);
    }

    #[test]
    fn empty_factors() {
        assert_eq!(risk_score(&[]), 0);
    }
}

// =============================================================================
// Aggregation Properties
// =============================================================================

mod properties {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn score_is_bounded(severities in prop::collection::vec(severity_strategy(), 0..12)) {
            let factors: Vec<RiskFactor> = severities.into_iter().map(factor).collect();
            prop_assert!(risk_score(&factors) <= 100);
        }

        #[test]
        fn adding_a_factor_never_lowers_risk(
            severities in prop::collection::vec(severity_strategy(), 0..10),
            extra in severity_strategy(),
        ) {
            let mut factors: Vec<RiskFactor> = severities.into_iter().map(factor).collect();
            let before = risk_score(&factors);
            factors.push(factor(extra));
            let after = risk_score(&factors);
            prop_assert!(after >= before);
            prop_assert!(overall_risk(after) >= overall_risk(before));
        }

        #[test]
        fn any_critical_factor_is_critical(
            severities in prop::collection::vec(severity_strategy(), 0..10),
            position in 0usize..10,
        ) {
            let mut factors: Vec<RiskFactor> = severities.into_iter().map(factor).collect();
            let at = position.min(factors.len());
            factors.insert(at, factor(Severity::Critical));
            prop_assert_eq!(overall_risk(risk_score(&factors)), Severity::Critical);
        }

        #[test]
        fn alerts_match_non_low_factors(severities in prop::collection::vec(severity_strategy(), 0..10)) {
            let factors: Vec<RiskFactor> = severities.into_iter().map(factor).collect();
            let analysis = aggregate_at(&factors, Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
            let expected = factors.iter().filter(|f| f.severity >= Severity::Moderate).count();
            let alerts = derive_alerts(&analysis);
            prop_assert_eq!(alerts.len(), expected);
            prop_assert!(alerts.iter().all(|a| a.timestamp == analysis.timestamp));
        }
    }
}
