//! Normalized shapes returned by provider adapters, plus unit helpers.

use chrono::NaiveDate;
use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A single current-weather reading as normalized by a provider adapter.
///
/// Location identity and capture timestamps are attached by the domain
/// layer; the adapter only knows the measurement and where it came from.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProviderObservation {
    /// Provider tag, e.g. "OpenWeatherMap" or "WeatherAPI".
    pub source: &'static str,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: i32,
    /// Wind speed in m/s, rounded to 2 decimal places.
    pub wind_speed: f64,
    /// Free-text condition description, e.g. "light rain".
    pub condition: String,
}

/// One day of a provider forecast, normalized to metric units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Calendar date of the forecast day.
    pub date: NaiveDate,
    /// Average temperature in degrees Celsius.
    pub temperature: f64,
    /// Average relative humidity in percent.
    pub humidity: i32,
    /// Maximum wind speed in m/s, rounded to 2 decimal places.
    pub wind_speed: f64,
    /// Free-text condition description.
    pub description: String,
}

/// Round a value to 2 decimal places, half away from zero.
///
/// Goes through [`Decimal`] rather than `(x * 100.0).round() / 100.0`:
/// the f64 nearest to a midpoint like 2.195 sits just below it, so the
/// naive form rounds down to 2.19 instead of 2.20.
pub fn round2(value: f64) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Convert km/h to m/s and round to 2 decimal places.
pub fn kph_to_ms(kph: f64) -> f64 {
    round2(kph / 3.6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2_basic() {
        assert_eq!(round2(1.388_888_9), 1.39);
        assert_eq!(round2(3.0), 3.0);
        assert_eq!(round2(0.004), 0.0);
        assert_eq!(round2(-1.005), -1.01);
    }

    #[test]
    fn test_round2_midpoint_representation() {
        // (3.0 + 1.39) / 2 is 2.195 in decimal but slightly below in f64.
        assert_eq!(round2((3.0 + 1.39) / 2.0), 2.2);
    }

    #[test]
    fn test_kph_to_ms() {
        assert_eq!(kph_to_ms(5.0), 1.39);
        assert_eq!(kph_to_ms(3.6), 1.0);
        assert_eq!(kph_to_ms(0.0), 0.0);
    }
}
