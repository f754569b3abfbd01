//! Alerts derived from a risk analysis

use uuid::Uuid;

use crate::models::{
    Alert, AlertKind, AlertSeverity, FactorKind, FactorValue, Level, RiskAnalysis, RiskFactor,
    Severity,
};
use crate::types::Language;

fn alert_kind(kind: FactorKind) -> AlertKind {
    match kind {
        FactorKind::Temperature
        | FactorKind::Humidity
        | FactorKind::Pressure
        | FactorKind::Wind
        | FactorKind::Cold
        | FactorKind::DryAir => AlertKind::Weather,
        FactorKind::UvIndex => AlertKind::UvIndex,
        FactorKind::AirQuality => AlertKind::AirQuality,
        FactorKind::Symptom => AlertKind::Health,
    }
}

fn alert_severity(severity: Severity) -> Option<AlertSeverity> {
    match severity {
        Severity::Low => None,
        Severity::Moderate => Some(AlertSeverity::Info),
        Severity::High => Some(AlertSeverity::Warning),
        Severity::Critical => Some(AlertSeverity::Danger),
    }
}

fn value_text(value: &FactorValue) -> String {
    match value {
        FactorValue::Number(n) => n.normalize().to_string(),
        FactorValue::Text(t) => t.clone(),
    }
}

fn alert_for(factor: &RiskFactor, analysis: &RiskAnalysis) -> Option<Alert> {
    let severity = alert_severity(factor.severity)?;
    let value = value_text(&factor.value);

    Some(Alert {
        id: Uuid::new_v4(),
        kind: alert_kind(factor.kind),
        severity,
        title: format!("{}: {}", factor.name, factor.severity),
        message: format!(
            "{} is {} ({}): {} risk",
            factor.name,
            value,
            factor.description.as_deref().unwrap_or("-"),
            factor.severity.label(Language::English).to_lowercase(),
        ),
        message_pt: format!(
            "{} em {}: risco {}",
            factor.name,
            value,
            factor.severity.label(Language::Portuguese).to_lowercase(),
        ),
        timestamp: analysis.timestamp,
    })
}

/// One alert per factor of moderate severity or above, in factor order
pub fn derive_alerts(analysis: &RiskAnalysis) -> Vec<Alert> {
    analysis
        .factors
        .iter()
        .filter_map(|factor| alert_for(factor, analysis))
        .collect()
}
