//! Weather provider trait definitions.

use async_trait::async_trait;

use crate::errors::WeatherDataError;
use crate::models::{ForecastDay, ProviderObservation};

/// Trait for current-weather providers.
///
/// Implement this trait to add support for a new upstream source. The
/// resilience pipeline wraps implementations with retry and circuit
/// breaking; adapters themselves perform exactly one network request per
/// call and never retry internally.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Used as the `source` tag on persisted observations and for circuit
    /// breaker logging.
    fn id(&self) -> &'static str;

    /// Fetch the current weather for a location by name.
    ///
    /// Performs one HTTP request and normalizes the payload (metric units,
    /// wind speed in m/s rounded to 2 decimal places).
    async fn current(
        &self,
        location_name: &str,
    ) -> Result<ProviderObservation, WeatherDataError>;
}

/// Trait for providers that can answer multi-day forecast queries.
///
/// The on-demand forecast path calls this directly, without the resilience
/// pipeline. Only the scheduled current-weather fetch is hardened; keeping
/// the forecast path a plain single attempt preserves the behavior of the
/// original service.
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Unique identifier for this provider.
    fn id(&self) -> &'static str;

    /// Fetch a `days`-long forecast for a location by name.
    ///
    /// `days` must already be validated to the provider-supported range
    /// (1 to 7); entries are returned in the order the provider sent them.
    async fn forecast(
        &self,
        location_name: &str,
        days: u8,
    ) -> Result<Vec<ForecastDay>, WeatherDataError>;
}
