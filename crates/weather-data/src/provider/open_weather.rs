//! OpenWeatherMap provider implementation.
//!
//! # API Endpoint
//!
//! - Current weather: `{base}/current?location={name}&key={key}&units=metric`
//!
//! # Response Format
//!
//! JSON with `main.temp` (°C), `main.humidity` (%), `wind.speed` (m/s) and
//! `weather[0].description`. Wind speed is already metric; it is only
//! rounded to 2 decimal places.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::errors::WeatherDataError;
use crate::models::{round2, ProviderObservation};
use crate::provider::{build_client, fetch_text, WeatherProvider};

const BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const PROVIDER_ID: &str = "OpenWeatherMap";

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    main: MainBlock,
    wind: WindBlock,
    #[serde(default)]
    weather: Vec<WeatherBlock>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    humidity: i32,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct WeatherBlock {
    description: String,
}

/// OpenWeatherMap adapter for current-weather readings.
pub struct OpenWeatherProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherProvider {
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

    fn parse(body: &str) -> Result<ProviderObservation, WeatherDataError> {
        let response: CurrentResponse =
            serde_json::from_str(body).map_err(|e| WeatherDataError::MalformedResponse {
                provider: PROVIDER_ID,
                message: e.to_string(),
            })?;

        let condition = response
            .weather
            .first()
            .map(|w| w.description.clone())
            .unwrap_or_default();

        Ok(ProviderObservation {
            source: PROVIDER_ID,
            temperature: response.main.temp,
            humidity: response.main.humidity,
            wind_speed: round2(response.wind.speed),
            condition,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn current(
        &self,
        location_name: &str,
    ) -> Result<ProviderObservation, WeatherDataError> {
        let url = format!(
            "{}/current?location={}&key={}&units=metric",
            self.base_url,
            urlencoding::encode(location_name),
            self.api_key,
        );

        let body = fetch_text(&self.client, PROVIDER_ID, &url).await?;
        Self::parse(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "main": { "temp": 10.0, "humidity": 80, "pressure": 1012 },
        "wind": { "speed": 3.004, "deg": 210 },
        "weather": [ { "id": 500, "main": "Rain", "description": "light rain" } ]
    }"#;

    #[test]
    fn test_parse_current_payload() {
        let obs = OpenWeatherProvider::parse(SAMPLE).unwrap();
        assert_eq!(obs.source, "OpenWeatherMap");
        assert_eq!(obs.temperature, 10.0);
        assert_eq!(obs.humidity, 80);
        assert_eq!(obs.wind_speed, 3.0);
        assert_eq!(obs.condition, "light rain");
    }

    #[test]
    fn test_parse_missing_weather_array() {
        let obs = OpenWeatherProvider::parse(
            r#"{ "main": { "temp": -2.5, "humidity": 61 }, "wind": { "speed": 7.77 } }"#,
        )
        .unwrap();
        assert_eq!(obs.temperature, -2.5);
        assert_eq!(obs.wind_speed, 7.77);
        assert_eq!(obs.condition, "");
    }

    #[test]
    fn test_parse_malformed_payload() {
        let err = OpenWeatherProvider::parse(r#"{ "wind": { "speed": 1.0 } }"#).unwrap_err();
        assert!(matches!(err, WeatherDataError::MalformedResponse { .. }));
    }
}
