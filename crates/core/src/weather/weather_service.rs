//! The scheduled collection sweep and the current-weather query.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use log::{debug, error, info};

use skycast_weather_data::FetchPipeline;

use super::weather_aggregator::reconcile;
use super::weather_model::{CurrentWeather, WeatherObservation};
use super::weather_traits::ObservationRepositoryTrait;
use crate::errors::Result;
use crate::locations::Location;

/// Collects current weather for every tracked location and serves the
/// latest reconciled readings.
///
/// The tracked set is loaded once at startup and fixed for the process
/// lifetime. One instance lives for the whole process; the scheduler calls
/// [`WeatherService::run_sweep`] periodically and the HTTP layer calls
/// [`WeatherService::current`] on demand.
pub struct WeatherService {
    locations: Vec<Location>,
    observation_repository: Arc<dyn ObservationRepositoryTrait>,
    primary: Arc<FetchPipeline>,
    secondary: Arc<FetchPipeline>,
}

impl WeatherService {
    pub fn new(
        locations: Vec<Location>,
        observation_repository: Arc<dyn ObservationRepositoryTrait>,
        primary: Arc<FetchPipeline>,
        secondary: Arc<FetchPipeline>,
    ) -> Self {
        Self {
            locations,
            observation_repository,
            primary,
            secondary,
        }
    }

    /// Runs one collection sweep over all tracked locations.
    ///
    /// Locations are fetched concurrently, each in its own task. A location
    /// whose fetch or persistence fails is logged and skipped; it never
    /// affects the other locations or the next sweep.
    pub async fn run_sweep(self: &Arc<Self>) {
        let started_at = Utc::now();

        info!(
            "Starting weather sweep over {} location(s)",
            self.locations.len()
        );

        let tasks: Vec<_> = self
            .locations
            .iter()
            .cloned()
            .map(|location| {
                let service = Arc::clone(self);
                tokio::spawn(async move {
                    service.sweep_location(&location, started_at).await;
                })
            })
            .collect();

        join_all(tasks).await;
        info!("Weather sweep finished");
    }

    /// Fetches both providers for one location and stores the outcome.
    ///
    /// Both fetches run concurrently. The sweep outcome is stored only when
    /// both succeed; a failure on either side discards the location for this
    /// pass, including the successful side's reading.
    async fn sweep_location(&self, location: &Location, captured_at: DateTime<Utc>) {
        debug!("Fetching weather for '{}'", location.name);

        let (primary, secondary) = tokio::join!(
            self.primary.attempt(&location.name),
            self.secondary.attempt(&location.name),
        );

        let (primary, secondary) = match (primary, secondary) {
            (Ok(a), Ok(b)) => (a, b),
            (a, b) => {
                if let Err(failure) = a {
                    error!(
                        "Sweep dropped '{}': {} (breaker {})",
                        location.name,
                        failure,
                        self.primary.breaker_state()
                    );
                }
                if let Err(failure) = b {
                    error!(
                        "Sweep dropped '{}': {} (breaker {})",
                        location.name,
                        failure,
                        self.secondary.breaker_state()
                    );
                }
                return;
            }
        };

        let raw_a = WeatherObservation::from_provider(&location.id, primary, captured_at);
        let raw_b = WeatherObservation::from_provider(&location.id, secondary, captured_at);
        let reconciled = reconcile(&raw_a, &raw_b);

        if let Err(e) = self
            .observation_repository
            .save_sweep(vec![raw_a, raw_b], reconciled)
            .await
        {
            error!("Failed to store sweep outcome for '{}': {}", location.name, e);
        }
    }

    /// Returns the latest reconciled reading for the given city.
    pub async fn current(&self, city: &str) -> Result<CurrentWeather> {
        let reconciled = self
            .observation_repository
            .latest_reconciled_for_city(city)
            .await?;

        Ok(CurrentWeather {
            city: city.to_string(),
            temperature: reconciled.temperature,
            humidity: reconciled.humidity,
            wind_speed: reconciled.wind_speed,
        })
    }
}
