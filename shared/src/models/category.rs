//! Metric identifiers and per-metric categories

use serde::{Deserialize, Serialize};

use crate::types::Language;

/// Metrics the classifier knows how to categorize
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MetricId {
    UvIndex,
    AirQuality,
    Temperature,
    Humidity,
    Pressure,
    WindSpeed,
}

impl MetricId {
    pub const ALL: [MetricId; 6] = [
        MetricId::Temperature,
        MetricId::Humidity,
        MetricId::Pressure,
        MetricId::WindSpeed,
        MetricId::UvIndex,
        MetricId::AirQuality,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricId::UvIndex => "uv_index",
            MetricId::AirQuality => "air_quality",
            MetricId::Temperature => "temperature",
            MetricId::Humidity => "humidity",
            MetricId::Pressure => "pressure",
            MetricId::WindSpeed => "wind_speed",
        }
    }
}

impl std::str::FromStr for MetricId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricId::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("unknown metric: {}", s))
    }
}

impl std::fmt::Display for MetricId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category within one metric's ordered scale.
///
/// The rank is the category's position in its threshold table, so a higher
/// rank always corresponds to a higher measured value.
pub trait Level: Copy + Ord + std::fmt::Debug {
    fn rank(self) -> u8;
    fn label(self, language: Language) -> &'static str;
}

/// WHO UV index categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UvLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl Level for UvLevel {
    fn rank(self) -> u8 {
        self as u8
    }

    fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (UvLevel::Low, Language::English) => "Low",
            (UvLevel::Low, Language::Portuguese) => "Baixo",
            (UvLevel::Moderate, Language::English) => "Moderate",
            (UvLevel::Moderate, Language::Portuguese) => "Moderado",
            (UvLevel::High, Language::English) => "High",
            (UvLevel::High, Language::Portuguese) => "Alto",
            (UvLevel::VeryHigh, Language::English) => "Very High",
            (UvLevel::VeryHigh, Language::Portuguese) => "Muito Alto",
            (UvLevel::Extreme, Language::English) => "Extreme",
            (UvLevel::Extreme, Language::Portuguese) => "Extremo",
        }
    }
}

/// EPA Air Quality Index categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AqiLevel {
    Good,
    Moderate,
    UnhealthyForSensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl Level for AqiLevel {
    fn rank(self) -> u8 {
        self as u8
    }

    fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (AqiLevel::Good, Language::English) => "Good",
            (AqiLevel::Good, Language::Portuguese) => "Bom",
            (AqiLevel::Moderate, Language::English) => "Moderate",
            (AqiLevel::Moderate, Language::Portuguese) => "Moderado",
            (AqiLevel::UnhealthyForSensitive, Language::English) => {
                "Unhealthy for Sensitive Groups"
            }
            (AqiLevel::UnhealthyForSensitive, Language::Portuguese) => {
                "Ruim para Grupos Sensíveis"
            }
            (AqiLevel::Unhealthy, Language::English) => "Unhealthy",
            (AqiLevel::Unhealthy, Language::Portuguese) => "Ruim",
            (AqiLevel::VeryUnhealthy, Language::English) => "Very Unhealthy",
            (AqiLevel::VeryUnhealthy, Language::Portuguese) => "Muito Ruim",
            (AqiLevel::Hazardous, Language::English) => "Hazardous",
            (AqiLevel::Hazardous, Language::Portuguese) => "Perigoso",
        }
    }
}

/// Air temperature categories (°C)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureLevel {
    Comfortable,
    Warm,
    Hot,
    VeryHot,
}

impl Level for TemperatureLevel {
    fn rank(self) -> u8 {
        self as u8
    }

    fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (TemperatureLevel::Comfortable, Language::English) => "Comfortable",
            (TemperatureLevel::Comfortable, Language::Portuguese) => "Agradável",
            (TemperatureLevel::Warm, Language::English) => "Warm",
            (TemperatureLevel::Warm, Language::Portuguese) => "Quente",
            (TemperatureLevel::Hot, Language::English) => "Hot",
            (TemperatureLevel::Hot, Language::Portuguese) => "Muito Quente",
            (TemperatureLevel::VeryHot, Language::English) => "Very Hot",
            (TemperatureLevel::VeryHot, Language::Portuguese) => "Calor Extremo",
        }
    }
}

/// Relative humidity categories (%)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HumidityLevel {
    Normal,
    Elevated,
    High,
    VeryHigh,
}

impl Level for HumidityLevel {
    fn rank(self) -> u8 {
        self as u8
    }

    fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (HumidityLevel::Normal, Language::English) => "Normal",
            (HumidityLevel::Normal, Language::Portuguese) => "Normal",
            (HumidityLevel::Elevated, Language::English) => "Elevated",
            (HumidityLevel::Elevated, Language::Portuguese) => "Elevada",
            (HumidityLevel::High, Language::English) => "High",
            (HumidityLevel::High, Language::Portuguese) => "Alta",
            (HumidityLevel::VeryHigh, Language::English) => "Very High",
            (HumidityLevel::VeryHigh, Language::Portuguese) => "Muito Alta",
        }
    }
}

/// Atmospheric pressure categories (hPa), ordered from lowest to highest pressure
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PressureLevel {
    VeryLow,
    Low,
    Normal,
    High,
}

impl Level for PressureLevel {
    fn rank(self) -> u8 {
        self as u8
    }

    fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (PressureLevel::VeryLow, Language::English) => "Very Low",
            (PressureLevel::VeryLow, Language::Portuguese) => "Muito Baixa",
            (PressureLevel::Low, Language::English) => "Low",
            (PressureLevel::Low, Language::Portuguese) => "Baixa",
            (PressureLevel::Normal, Language::English) => "Normal",
            (PressureLevel::Normal, Language::Portuguese) => "Normal",
            (PressureLevel::High, Language::English) => "High",
            (PressureLevel::High, Language::Portuguese) => "Alta",
        }
    }
}

/// Wind speed categories (km/h)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WindLevel {
    Calm,
    Light,
    Strong,
    VeryStrong,
}

impl Level for WindLevel {
    fn rank(self) -> u8 {
        self as u8
    }

    fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (WindLevel::Calm, Language::English) => "Calm",
            (WindLevel::Calm, Language::Portuguese) => "Calmo",
            (WindLevel::Light, Language::English) => "Light",
            (WindLevel::Light, Language::Portuguese) => "Brisa",
            (WindLevel::Strong, Language::English) => "Strong",
            (WindLevel::Strong, Language::Portuguese) => "Forte",
            (WindLevel::VeryStrong, Language::English) => "Very Strong",
            (WindLevel::VeryStrong, Language::Portuguese) => "Muito Forte",
        }
    }
}

/// Result of classifying one metric value.
///
/// `Unknown` is only produced for an absent value and has no rank.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "metric", content = "level", rename_all = "snake_case")]
pub enum Category {
    Unknown,
    Uv(UvLevel),
    AirQuality(AqiLevel),
    Temperature(TemperatureLevel),
    Humidity(HumidityLevel),
    Pressure(PressureLevel),
    Wind(WindLevel),
}

impl Category {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Category::Unknown)
    }

    /// Severity rank within the metric's scale; `None` for `Unknown`
    pub fn rank(&self) -> Option<u8> {
        match *self {
            Category::Unknown => None,
            Category::Uv(level) => Some(level.rank()),
            Category::AirQuality(level) => Some(level.rank()),
            Category::Temperature(level) => Some(level.rank()),
            Category::Humidity(level) => Some(level.rank()),
            Category::Pressure(level) => Some(level.rank()),
            Category::Wind(level) => Some(level.rank()),
        }
    }

    pub fn label(&self, language: Language) -> &'static str {
        match *self {
            Category::Unknown => match language {
                Language::English => "Unknown",
                Language::Portuguese => "Desconhecido",
            },
            Category::Uv(level) => level.label(language),
            Category::AirQuality(level) => level.label(language),
            Category::Temperature(level) => level.label(language),
            Category::Humidity(level) => level.label(language),
            Category::Pressure(level) => level.label(language),
            Category::Wind(level) => level.label(language),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label(Language::English))
    }
}
