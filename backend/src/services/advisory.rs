//! Advisory service: serves readings and builds risk reports
//!
//! Source selection for a location:
//! 1. a fresh cached live reading
//! 2. a new live reading, which is cached
//! 3. a synthetic reading, which is never cached

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    assess, body_system_impacts, check_plausibility, derive_alerts, normalize, symptom_factor,
    Alert, BodySystemImpact, CachedReading, RawReading, Reading, ReadingSource, RiskAnalysis,
    RiskFactor, StalenessPolicy,
};

use crate::cache::ReadingCache;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::external::{OpenWeatherClient, SyntheticSource};

// ============================================================================
// Sources
// ============================================================================

/// City and country a reading is requested for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub city: String,
    pub country: String,
}

impl Location {
    /// Parse `"city"` or `"city,country"`; missing parts take the defaults
    pub fn parse(input: Option<&str>, default_city: &str, default_country: &str) -> AppResult<Self> {
        let input = input.map(str::trim).unwrap_or_default();
        if input.is_empty() {
            return Ok(Self {
                city: default_city.to_string(),
                country: default_country.to_string(),
            });
        }

        let (city, country) = match input.rsplit_once(',') {
            Some((city, country)) => (city.trim(), country.trim()),
            None => (input, ""),
        };
        if city.is_empty() {
            return Err(AppError::validation(
                "location",
                "Location must name a city",
                "A localização deve informar uma cidade",
            ));
        }

        Ok(Self {
            city: city.to_string(),
            country: if country.is_empty() {
                default_country.to_string()
            } else {
                country.to_string()
            },
        })
    }

    /// Cache key and display form, `"city,country"`
    pub fn key(&self) -> String {
        format!("{},{}", self.city, self.country)
    }
}

/// Anything that can produce a raw reading for a location
#[axum::async_trait]
pub trait ReadingProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(&self, location: &Location) -> AppResult<RawReading>;
}

/// A reading together with where it came from
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServedReading {
    pub reading: Reading,
    pub source: ReadingSource,
    pub captured_at: DateTime<Utc>,
    pub location: String,
}

// ============================================================================
// Reports
// ============================================================================

/// External diagnosis signal attached to an assessment
#[derive(Debug, Clone, Deserialize)]
pub struct SymptomSignal {
    pub name: String,
    /// 0..1
    pub probability: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskReport {
    pub reading: Reading,
    pub analysis: RiskAnalysis,
    pub body_systems: Vec<BodySystemImpact>,
    pub alerts: Vec<Alert>,
}

/// Turn diagnosis signals into risk factors, rejecting probabilities outside 0..1
pub fn symptom_factors(signals: &[SymptomSignal]) -> AppResult<Vec<RiskFactor>> {
    signals
        .iter()
        .map(|signal| {
            if signal.name.trim().is_empty() {
                return Err(AppError::validation(
                    "symptoms.name",
                    "Symptom name must not be empty",
                    "O nome do sintoma não pode ser vazio",
                ));
            }
            if signal.probability < Decimal::ZERO || signal.probability > Decimal::ONE {
                return Err(AppError::validation(
                    "symptoms.probability",
                    "Probability must be between 0 and 1",
                    "A probabilidade deve estar entre 0 e 1",
                ));
            }
            Ok(symptom_factor(signal.name.trim(), signal.probability))
        })
        .collect()
}

/// Full report for a canonical reading
pub fn build_report(reading: Reading, symptoms: &[RiskFactor]) -> RiskReport {
    let analysis = assess(&reading, symptoms);
    let alerts = derive_alerts(&analysis);
    RiskReport {
        body_systems: body_system_impacts(&reading),
        reading,
        analysis,
        alerts,
    }
}

// ============================================================================
// Service
// ============================================================================

pub struct AdvisoryService {
    live: Option<Arc<dyn ReadingProvider>>,
    fallback: Arc<dyn ReadingProvider>,
    cache: ReadingCache,
    policy: StalenessPolicy,
}

impl AdvisoryService {
    pub fn new(
        live: Option<Arc<dyn ReadingProvider>>,
        fallback: Arc<dyn ReadingProvider>,
        policy: StalenessPolicy,
    ) -> Self {
        Self {
            live,
            fallback,
            cache: ReadingCache::new(),
            policy,
        }
    }

    /// Live OpenWeather source when an API key is configured, synthetic fallback always
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let live: Option<Arc<dyn ReadingProvider>> = match config.weather_api_key() {
            Some(key) => {
                let client = OpenWeatherClient::with_base_url(
                    key.to_string(),
                    config.weather.api_endpoint.clone(),
                    Duration::from_secs(config.weather.request_timeout_secs),
                )?;
                Some(Arc::new(client) as Arc<dyn ReadingProvider>)
            }
            None => {
                tracing::warn!("No weather API key configured; all readings will be simulated");
                None
            }
        };

        Ok(Self::new(
            live,
            Arc::new(SyntheticSource::new()),
            config.cache.staleness_policy(),
        ))
    }

    /// Name of the live source, if one is configured
    pub fn live_source(&self) -> Option<&'static str> {
        self.live.as_ref().map(|live| live.name())
    }

    pub async fn cached_locations(&self) -> usize {
        self.cache.len().await
    }

    /// Current reading for a location
    pub async fn current(&self, location: &Location) -> AppResult<ServedReading> {
        self.current_at(location, Utc::now()).await
    }

    async fn current_at(&self, location: &Location, now: DateTime<Utc>) -> AppResult<ServedReading> {
        let key = location.key();

        if let Some(entry) = self.cache.fresh(&key, &self.policy, now).await {
            tracing::debug!("Serving cached reading for {}", key);
            return Ok(ServedReading {
                reading: entry.reading,
                source: ReadingSource::Cache,
                captured_at: entry.captured_at,
                location: entry.location,
            });
        }

        match self.fetch_live(location).await {
            Ok(raw) => {
                let reading = self.normalize_logged(&raw, &key);
                self.cache
                    .put(CachedReading::new(reading.clone(), now, key.clone()), &self.policy)
                    .await;
                tracing::info!("Fetched live reading for {}", key);
                return Ok(ServedReading {
                    reading,
                    source: ReadingSource::Api,
                    captured_at: now,
                    location: key,
                });
            }
            Err(e) => {
                tracing::warn!("Live reading for {} unavailable, simulating: {}", key, e);
            }
        }

        let raw = self.fallback.fetch(location).await?;
        tracing::info!("Serving {} reading for {}", self.fallback.name(), key);
        Ok(ServedReading {
            reading: normalize(&raw),
            source: ReadingSource::Simulated,
            captured_at: now,
            location: key,
        })
    }

    async fn fetch_live(&self, location: &Location) -> AppResult<RawReading> {
        match &self.live {
            Some(live) => live.fetch(location).await,
            None => Err(AppError::WeatherServiceUnavailable),
        }
    }

    fn normalize_logged(&self, raw: &RawReading, key: &str) -> Reading {
        let reading = normalize(raw);
        for issue in check_plausibility(&reading) {
            tracing::warn!(
                "Implausible {} for {}: {} (expected {}..={})",
                issue.metric,
                key,
                issue.value,
                issue.min,
                issue.max
            );
        }
        reading
    }

    /// Risk report for the current reading of a location
    pub async fn analysis(
        &self,
        location: &Location,
        symptoms: &[SymptomSignal],
    ) -> AppResult<(ServedReading, RiskReport)> {
        let factors = symptom_factors(symptoms)?;
        let served = self.current(location).await?;
        let report = build_report(served.reading.clone(), &factors);
        tracing::debug!(
            "Risk for {}: {} ({})",
            served.location,
            report.analysis.overall_risk,
            report.analysis.risk_score
        );
        Ok((served, report))
    }
}
