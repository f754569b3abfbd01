//! Risk factor and risk analysis models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Level;
use crate::thresholds::{
    TIER_WEIGHT_CRITICAL, TIER_WEIGHT_HIGH, TIER_WEIGHT_LOW, TIER_WEIGHT_MODERATE,
};
use crate::types::Language;

/// Severity tier, shared by individual factors and the overall risk
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Moderate,
    High,
    Critical,
}

impl Severity {
    /// Contribution of one factor of this tier to the aggregate score
    pub fn weight(self) -> u32 {
        match self {
            Severity::Low => TIER_WEIGHT_LOW,
            Severity::Moderate => TIER_WEIGHT_MODERATE,
            Severity::High => TIER_WEIGHT_HIGH,
            Severity::Critical => TIER_WEIGHT_CRITICAL,
        }
    }
}

impl Level for Severity {
    fn rank(self) -> u8 {
        self as u8
    }

    fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (Severity::Low, Language::English) => "Low",
            (Severity::Low, Language::Portuguese) => "Baixo",
            (Severity::Moderate, Language::English) => "Moderate",
            (Severity::Moderate, Language::Portuguese) => "Moderado",
            (Severity::High, Language::English) => "High",
            (Severity::High, Language::Portuguese) => "Alto",
            (Severity::Critical, Language::English) => "Critical",
            (Severity::Critical, Language::Portuguese) => "Crítico",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label(Language::English))
    }
}

/// What a risk factor was derived from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    Temperature,
    Humidity,
    Pressure,
    Wind,
    UvIndex,
    AirQuality,
    /// Temperature below the intense-cold limit
    Cold,
    /// Humidity below the dry-air limit
    DryAir,
    /// External health signal such as a symptom-based diagnosis
    Symptom,
}

/// Factor value, numeric for measurements and textual for external signals
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FactorValue {
    Number(Decimal),
    Text(String),
}

/// One classified contributor to the overall risk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactor {
    pub kind: FactorKind,
    pub name: String,
    pub value: FactorValue,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RiskFactor {
    pub fn new(
        kind: FactorKind,
        name: impl Into<String>,
        value: FactorValue,
        severity: Severity,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            value,
            severity,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Aggregate assessment over a set of factors
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAnalysis {
    pub overall_risk: Severity,
    /// 0-100
    pub risk_score: u8,
    pub factors: Vec<RiskFactor>,
    pub recommendations: Vec<String>,
    pub recommendations_pt: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Body systems affected by weather conditions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BodySystem {
    Cardiovascular,
    Respiratory,
    Neurological,
}

/// Expected weather impact on one body system
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BodySystemImpact {
    pub system: BodySystem,
    pub level: Severity,
    pub reason: String,
    pub reason_pt: String,
}

/// Alert categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Weather,
    AirQuality,
    UvIndex,
    Health,
}

/// Alert urgency
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Info,
    Warning,
    Danger,
}

/// Alert derived from a risk analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: Uuid,
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub title: String,
    pub message: String,
    pub message_pt: String,
    pub timestamp: DateTime<Utc>,
}
