//! HTTP handlers for risk assessment

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{
    check_plausibility, classify_reading, normalize, Level, PlausibilityIssue, RawReading,
    ReadingCategories, ReadingSource,
};

use super::LocationQuery;
use crate::error::AppResult;
use crate::services::advisory::{
    build_report, symptom_factors, Location, RiskReport, SymptomSignal,
};
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskResponse {
    pub location: String,
    pub source: ReadingSource,
    pub captured_at: DateTime<Utc>,
    pub overall_label: &'static str,
    #[serde(flatten)]
    pub report: RiskReport,
}

/// Risk report for the current reading of a location
pub async fn get_risk(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> AppResult<Json<RiskResponse>> {
    let location = Location::parse(
        query.location.as_deref(),
        &state.config.weather.default_city,
        &state.config.weather.default_country,
    )?;

    let (served, report) = state.advisory.analysis(&location, &[]).await?;

    Ok(Json(RiskResponse {
        location: served.location,
        source: served.source,
        captured_at: served.captured_at,
        overall_label: report.analysis.overall_risk.label(query.language()),
        report,
    }))
}

#[derive(Debug, Deserialize)]
pub struct AssessRequest {
    pub reading: RawReading,
    #[serde(default)]
    pub symptoms: Vec<SymptomSignal>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessResponse {
    #[serde(flatten)]
    pub report: RiskReport,
    pub categories: ReadingCategories,
    pub plausibility_issues: Vec<PlausibilityIssue>,
}

/// Assess a caller-supplied reading, optionally with diagnosis signals
pub async fn assess_reading(Json(request): Json<AssessRequest>) -> AppResult<Json<AssessResponse>> {
    let factors = symptom_factors(&request.symptoms)?;
    let reading = normalize(&request.reading);
    let categories = classify_reading(&reading);
    let plausibility_issues = check_plausibility(&reading);

    Ok(Json(AssessResponse {
        report: build_report(reading, &factors),
        categories,
        plausibility_issues,
    }))
}
