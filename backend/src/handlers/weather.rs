//! HTTP handlers for current weather readings

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use shared::{
    air_quality_description, check_plausibility, classify_reading, uv_description,
    PlausibilityIssue, ReadingCategories,
};

use super::LocationQuery;
use crate::error::AppResult;
use crate::services::advisory::{Location, ServedReading};
use crate::AppState;

/// Category labels in the requested language
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingLabels {
    pub temperature: &'static str,
    pub humidity: &'static str,
    pub pressure: &'static str,
    pub wind_speed: &'static str,
    pub uv_index: &'static str,
    pub air_quality: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeatherResponse {
    #[serde(flatten)]
    pub served: ServedReading,
    pub categories: ReadingCategories,
    pub labels: ReadingLabels,
    pub uv_description: &'static str,
    pub air_quality_description: &'static str,
    pub plausibility_issues: Vec<PlausibilityIssue>,
}

/// Current reading for a location with its categories
pub async fn get_current_weather(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> AppResult<Json<CurrentWeatherResponse>> {
    let location = Location::parse(
        query.location.as_deref(),
        &state.config.weather.default_city,
        &state.config.weather.default_country,
    )?;
    let language = query.language();

    let served = state.advisory.current(&location).await?;
    let reading = &served.reading;
    let categories = classify_reading(reading);

    Ok(Json(CurrentWeatherResponse {
        labels: ReadingLabels {
            temperature: categories.temperature.label(language),
            humidity: categories.humidity.label(language),
            pressure: categories.pressure.label(language),
            wind_speed: categories.wind_speed.label(language),
            uv_index: categories.uv_index.label(language),
            air_quality: categories.air_quality.label(language),
        },
        uv_description: uv_description(reading.uv_index),
        air_quality_description: air_quality_description(reading.air_quality),
        plausibility_issues: check_plausibility(reading),
        categories,
        served,
    }))
}
