//! WeatherAPI provider implementation.
//!
//! # API Endpoints
//!
//! - Current weather: `{base}/current.json?key={key}&q={name}`
//! - Forecast: `{base}/forecast.json?key={key}&q={name}&days={1..7}`
//!
//! # Response Format
//!
//! Current: `current.temp_c`, `current.humidity`, `current.wind_kph` and
//! `current.condition.text`. Forecast: `forecast.forecastday[]`, each with
//! `date` (ISO date string), `day.avgtemp_c`, `day.avghumidity`,
//! `day.maxwind_kph` and `day.condition.text`. Wind speeds arrive in km/h
//! and are converted to m/s (÷3.6, rounded to 2 decimal places).

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

use crate::errors::WeatherDataError;
use crate::models::{kph_to_ms, ForecastDay, ProviderObservation};
use crate::provider::{build_client, fetch_text, ForecastProvider, WeatherProvider};

const BASE_URL: &str = "https://api.weatherapi.com/v1";
const PROVIDER_ID: &str = "WeatherAPI";

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    current: CurrentBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temp_c: f64,
    humidity: i32,
    wind_kph: f64,
    condition: ConditionBlock,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    forecast: ForecastBlock,
}

#[derive(Debug, Deserialize)]
struct ForecastBlock {
    forecastday: Vec<ForecastDayBlock>,
}

#[derive(Debug, Deserialize)]
struct ForecastDayBlock {
    date: String,
    day: DayBlock,
}

#[derive(Debug, Deserialize)]
struct DayBlock {
    avgtemp_c: f64,
    avghumidity: f64,
    maxwind_kph: f64,
    condition: ConditionBlock,
}

/// WeatherAPI adapter for current-weather readings and forecasts.
pub struct WeatherApiProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherApiProvider {
    /// Create a new provider with the given API key.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL.to_string())
    }

    /// Create a provider pointed at a custom base URL (used in tests).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: build_client(),
            base_url,
            api_key,
        }
    }

    fn parse_current(body: &str) -> Result<ProviderObservation, WeatherDataError> {
        let response: CurrentResponse =
            serde_json::from_str(body).map_err(|e| WeatherDataError::MalformedResponse {
                provider: PROVIDER_ID,
                message: e.to_string(),
            })?;

        Ok(ProviderObservation {
            source: PROVIDER_ID,
            temperature: response.current.temp_c,
            humidity: response.current.humidity,
            wind_speed: kph_to_ms(response.current.wind_kph),
            condition: response.current.condition.text,
        })
    }

    fn parse_forecast(body: &str) -> Result<Vec<ForecastDay>, WeatherDataError> {
        let response: ForecastResponse =
            serde_json::from_str(body).map_err(|e| WeatherDataError::MalformedResponse {
                provider: PROVIDER_ID,
                message: e.to_string(),
            })?;

        response
            .forecast
            .forecastday
            .into_iter()
            .map(|entry| {
                let date = NaiveDate::parse_from_str(&entry.date, "%Y-%m-%d").map_err(|e| {
                    WeatherDataError::MalformedResponse {
                        provider: PROVIDER_ID,
                        message: format!("bad forecast date '{}': {}", entry.date, e),
                    }
                })?;

                Ok(ForecastDay {
                    date,
                    temperature: entry.day.avgtemp_c,
                    humidity: entry.day.avghumidity as i32,
                    wind_speed: kph_to_ms(entry.day.maxwind_kph),
                    description: entry.day.condition.text,
                })
            })
            .collect()
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn current(
        &self,
        location_name: &str,
    ) -> Result<ProviderObservation, WeatherDataError> {
        let url = format!(
            "{}/current.json?key={}&q={}",
            self.base_url,
            self.api_key,
            urlencoding::encode(location_name),
        );

        let body = fetch_text(&self.client, PROVIDER_ID, &url).await?;
        Self::parse_current(&body)
    }
}

#[async_trait]
impl ForecastProvider for WeatherApiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn forecast(
        &self,
        location_name: &str,
        days: u8,
    ) -> Result<Vec<ForecastDay>, WeatherDataError> {
        let url = format!(
            "{}/forecast.json?key={}&q={}&days={}",
            self.base_url,
            self.api_key,
            urlencoding::encode(location_name),
            days,
        );

        let body = fetch_text(&self.client, PROVIDER_ID, &url).await?;
        Self::parse_forecast(&body)
    }
}
