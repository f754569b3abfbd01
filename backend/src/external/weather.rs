//! OpenWeather API client for live readings
//!
//! One reading takes up to four calls: current conditions, the UV index
//! (One Call 2.5, then One Call 3.0 on 401, then the legacy `/uvi` endpoint)
//! and air pollution. Only the current conditions call is mandatory; the
//! others degrade to absent values.

use reqwest::{Client, StatusCode};
use rust_decimal::prelude::*;
use serde::Deserialize;
use shared::{map_openweather_aqi, round_half_up, RawReading};
use std::time::Duration;

use crate::error::{AppError, AppResult};
use crate::services::advisory::{Location, ReadingProvider};

/// m/s to km/h
const MPS_TO_KMH: Decimal = Decimal::from_parts(36, 0, 0, false, 1);

/// OpenWeather API client
#[derive(Clone)]
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// OpenWeather response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    name: Option<String>,
    coord: Option<OWMCoord>,
    #[serde(default)]
    weather: Vec<OWMWeather>,
    main: Option<OWMMain>,
    wind: Option<OWMWind>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
struct OWMCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    main: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: Option<f64>,
    pressure: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    speed: Option<f64>,
}

/// One Call response, only the current UV index is used
#[derive(Debug, Deserialize)]
struct OWMOneCallResponse {
    current: Option<OWMOneCallCurrent>,
}

#[derive(Debug, Deserialize)]
struct OWMOneCallCurrent {
    uvi: Option<f64>,
}

/// Legacy `/uvi` response
#[derive(Debug, Deserialize)]
struct OWMUviResponse {
    value: Option<f64>,
    uvi: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OWMAirPollutionResponse {
    #[serde(default)]
    list: Vec<OWMAirPollutionItem>,
}

#[derive(Debug, Deserialize)]
struct OWMAirPollutionItem {
    main: Option<OWMAirPollutionMain>,
}

#[derive(Debug, Deserialize)]
struct OWMAirPollutionMain {
    aqi: Option<u8>,
}

impl OpenWeatherClient {
    /// Create a client with a custom base URL
    pub fn with_base_url(api_key: String, base_url: String, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the current reading for a city
    pub async fn current_reading(&self, city: &str, country: &str) -> AppResult<RawReading> {
        let query = format!("{},{}", city, country);
        let url = format!("{}/weather", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", "pt_br"),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Weather API request failed: {}", e.without_url())))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("Location '{}'", query)));
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        let data: OWMCurrentResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse weather response: {}", e.without_url()))
        })?;

        tracing::debug!(
            "Weather API resolved '{}' to {}",
            query,
            data.name.as_deref().unwrap_or("unknown")
        );

        let mut reading = convert_current_response(&data);

        if let Some(coord) = data.coord {
            if let Some(uv) = self.fetch_uv_index(coord).await {
                reading.uv_index = Some(uv);
                reading.uv_from_api = true;
            }
            reading.air_quality = self.fetch_air_quality(coord).await;
        } else {
            tracing::warn!("Weather API returned no coordinates for '{}'", query);
        }

        Ok(reading)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        coord: OWMCoord,
        extra: &[(&str, &str)],
    ) -> Result<T, Option<StatusCode>> {
        let lat = coord.lat.to_string();
        let lon = coord.lon.to_string();

        let response = self
            .client
            .get(url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .query(extra)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Request to {} failed: {}", url, e.without_url());
                None
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{} answered {}", url, status);
            return Err(Some(status));
        }

        response.json::<T>().await.map_err(|e| {
            tracing::warn!("Failed to parse response from {}: {}", url, e.without_url());
            None
        })
    }

    async fn fetch_uv_index(&self, coord: OWMCoord) -> Option<Decimal> {
        let onecall_params = [
            ("exclude", "minutely,hourly,daily,alerts"),
            ("units", "metric"),
        ];

        let v25 = format!("{}/onecall", self.base_url);
        match self
            .get_json::<OWMOneCallResponse>(&v25, coord, &onecall_params)
            .await
        {
            Ok(data) => return Some(uv_from_onecall(&data)),
            Err(Some(StatusCode::UNAUTHORIZED)) => {
                let v30 = format!("{}/onecall", self.base_url.replace("/data/2.5", "/data/3.0"));
                if let Ok(data) = self
                    .get_json::<OWMOneCallResponse>(&v30, coord, &onecall_params)
                    .await
                {
                    return Some(uv_from_onecall(&data));
                }
            }
            Err(_) => {}
        }

        let uvi = format!("{}/uvi", self.base_url);
        self.get_json::<OWMUviResponse>(&uvi, coord, &[])
            .await
            .ok()
            .map(|data| uv_from_legacy(&data))
    }

    async fn fetch_air_quality(&self, coord: OWMCoord) -> Option<Decimal> {
        let url = format!("{}/air_pollution", self.base_url);
        let data = self
            .get_json::<OWMAirPollutionResponse>(&url, coord, &[])
            .await
            .ok()?;
        aqi_from_air_pollution(&data)
    }
}

#[axum::async_trait]
impl ReadingProvider for OpenWeatherClient {
    fn name(&self) -> &'static str {
        "openweather"
    }

    async fn fetch(&self, location: &Location) -> AppResult<RawReading> {
        self.current_reading(&location.city, &location.country).await
    }
}

/// f64 to Decimal; non-finite values become absent
fn to_decimal(value: f64) -> Option<Decimal> {
    Decimal::try_from(value).ok()
}

/// Convert OpenWeather current response to a raw reading
fn convert_current_response(data: &OWMCurrentResponse) -> RawReading {
    let main = data.main.as_ref();
    let weather = data.weather.first();

    RawReading {
        temperature: main.and_then(|m| m.temp).and_then(to_decimal),
        humidity: main.and_then(|m| m.humidity).and_then(to_decimal),
        pressure: main.and_then(|m| m.pressure).and_then(to_decimal),
        wind_speed: data
            .wind
            .as_ref()
            .and_then(|w| w.speed)
            .and_then(to_decimal)
            // out-of-range speeds are dropped rather than overflowing
            .and_then(|mps| mps.checked_mul(MPS_TO_KMH))
            .map(round_half_up),
        uv_index: None,
        uv_from_api: false,
        air_quality: None,
        condition: weather.and_then(|w| w.description.clone().or_else(|| w.main.clone())),
    }
}

fn uv_from_onecall(data: &OWMOneCallResponse) -> Decimal {
    let uvi = data.current.as_ref().and_then(|c| c.uvi).and_then(to_decimal);
    round_half_up(uvi.unwrap_or(Decimal::ZERO))
}

fn uv_from_legacy(data: &OWMUviResponse) -> Decimal {
    let uvi = data.value.or(data.uvi).and_then(to_decimal);
    round_half_up(uvi.unwrap_or(Decimal::ZERO))
}

fn aqi_from_air_pollution(data: &OWMAirPollutionResponse) -> Option<Decimal> {
    data.list
        .first()
        .and_then(|item| item.main.as_ref())
        .and_then(|main| main.aqi)
        .filter(|aqi| *aqi > 0)
        .map(map_openweather_aqi)
}
