//! The on-demand forecast query.
//!
//! Forecasts come from a single provider and are fetched with a plain
//! single-attempt call: the retry/breaker hardening around the scheduled
//! sweep deliberately does not apply to this path.

use std::sync::Arc;

use log::debug;

use skycast_weather_data::ForecastProvider;

use super::weather_model::{AggregatedForecast, AggregatedForecastDay};
use crate::errors::{Error, Result};

/// Bounds for the forecast horizon, in days.
const MIN_FORECAST_DAYS: u8 = 1;
const MAX_FORECAST_DAYS: u8 = 7;

/// Serves forecast queries straight from the forecast-capable provider.
pub struct ForecastService {
    provider: Arc<dyn ForecastProvider>,
}

impl ForecastService {
    pub fn new(provider: Arc<dyn ForecastProvider>) -> Self {
        Self { provider }
    }

    /// Fetches a `days`-day forecast for the given city.
    ///
    /// `days` must be within 1..=7; anything else is rejected before the
    /// provider is contacted.
    pub async fn forecast(&self, city: &str, days: u8) -> Result<AggregatedForecast> {
        if !(MIN_FORECAST_DAYS..=MAX_FORECAST_DAYS).contains(&days) {
            return Err(Error::Validation(format!(
                "days must be between {} and {}, got {}",
                MIN_FORECAST_DAYS, MAX_FORECAST_DAYS, days
            )));
        }

        debug!("Fetching {}-day forecast for '{}'", days, city);

        let days = self.provider.forecast(city, days).await?;

        Ok(AggregatedForecast {
            city: city.to_string(),
            days: days.into_iter().map(AggregatedForecastDay::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicU32, Ordering};

    use skycast_weather_data::{ForecastDay, WeatherDataError};

    struct FixedForecast {
        days: Vec<ForecastDay>,
        calls: AtomicU32,
    }

    #[async_trait]
    impl ForecastProvider for FixedForecast {
        fn id(&self) -> &'static str {
            "WeatherAPI"
        }

        async fn forecast(
            &self,
            _: &str,
            days: u8,
        ) -> std::result::Result<Vec<ForecastDay>, WeatherDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.days.iter().take(days as usize).cloned().collect())
        }
    }

    fn sample_days() -> Vec<ForecastDay> {
        (0..3)
            .map(|i| ForecastDay {
                date: NaiveDate::from_ymd_opt(2025, 6, 10 + i).unwrap(),
                temperature: 18.0 + i as f64,
                humidity: 60 + i as i32,
                wind_speed: 5.0,
                description: format!("day {}", i),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_forecast_preserves_day_order() {
        let provider = Arc::new(FixedForecast {
            days: sample_days(),
            calls: AtomicU32::new(0),
        });
        let service = ForecastService::new(provider.clone());

        let forecast = service.forecast("Paris", 3).await.unwrap();
        assert_eq!(forecast.city, "Paris");
        assert_eq!(forecast.days.len(), 3);
        assert_eq!(
            forecast.days[0].date,
            NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
        );
        assert_eq!(forecast.days[2].descriptions, vec!["day 2"]);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_forecast_rejects_out_of_range_days() {
        let provider = Arc::new(FixedForecast {
            days: sample_days(),
            calls: AtomicU32::new(0),
        });
        let service = ForecastService::new(provider.clone());

        for days in [0u8, 8, 100] {
            let err = service.forecast("Paris", days).await.unwrap_err();
            assert!(matches!(err, Error::Validation(_)));
        }

        // Out-of-range requests never reach the provider.
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_forecast_propagates_provider_error() {
        struct Failing;

        #[async_trait]
        impl ForecastProvider for Failing {
            fn id(&self) -> &'static str {
                "WeatherAPI"
            }

            async fn forecast(
                &self,
                _: &str,
                _: u8,
            ) -> std::result::Result<Vec<ForecastDay>, WeatherDataError> {
                Err(WeatherDataError::RateLimited {
                    provider: "WeatherAPI",
                })
            }
        }

        let service = ForecastService::new(Arc::new(Failing));
        let err = service.forecast("Paris", 3).await.unwrap_err();
        assert!(matches!(err, Error::WeatherData(_)));
    }
}
