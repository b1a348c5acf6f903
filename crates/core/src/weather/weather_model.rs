//! Weather domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use skycast_weather_data::{ForecastDay, ProviderObservation};

/// A raw, as-reported reading from a single provider for one location.
///
/// Stored verbatim (after unit normalization in the adapter layer) so that
/// per-provider history survives reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherObservation {
    pub id: String,
    pub location_id: String,
    /// Provider tag, e.g. `OpenWeatherMap` or `WeatherAPI`.
    pub source: String,
    /// Temperature in °C.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: i32,
    /// Wind speed in m/s.
    pub wind_speed: f64,
    /// Free-text condition description from the provider.
    pub condition: String,
    pub created_at: DateTime<Utc>,
}

impl WeatherObservation {
    /// Builds a storable observation from a normalized provider reading.
    ///
    /// `captured_at` is the sweep start time, shared by every row the sweep
    /// writes so the readings of one pass line up.
    pub fn from_provider(
        location_id: &str,
        observation: ProviderObservation,
        captured_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            location_id: location_id.to_string(),
            source: observation.source.to_string(),
            temperature: observation.temperature,
            humidity: observation.humidity,
            wind_speed: observation.wind_speed,
            condition: observation.condition,
            created_at: captured_at,
        }
    }
}

/// The merged reading derived from both providers' raw observations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReconciledObservation {
    pub id: String,
    pub location_id: String,
    /// Arithmetic mean of both temperatures, in °C.
    pub temperature: f64,
    /// Integer mean of both humidities, truncated toward zero.
    pub humidity: i32,
    /// Mean wind speed in m/s, rounded to 2 decimal places.
    pub wind_speed: f64,
    pub created_at: DateTime<Utc>,
}

/// Response model for the current-weather query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeather {
    pub city: String,
    pub temperature: f64,
    pub humidity: i32,
    pub wind_speed: f64,
}

/// One day of the forecast response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedForecastDay {
    pub date: NaiveDate,
    pub temperature_avg: f64,
    pub humidity_avg: i32,
    pub wind_speed_avg: f64,
    pub descriptions: Vec<String>,
}

impl From<ForecastDay> for AggregatedForecastDay {
    fn from(day: ForecastDay) -> Self {
        Self {
            date: day.date,
            temperature_avg: day.temperature,
            humidity_avg: day.humidity,
            wind_speed_avg: day.wind_speed,
            descriptions: vec![day.description],
        }
    }
}

/// Response model for the forecast query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedForecast {
    pub city: String,
    pub days: Vec<AggregatedForecastDay>,
}
