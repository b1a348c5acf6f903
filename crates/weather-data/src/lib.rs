//! Skycast Weather Data - provider adapters and resilience layer.
//!
//! This crate owns everything that talks to the upstream weather providers:
//! the provider trait and its two implementations, the error taxonomy with
//! retry classification, and the per-provider resilience pipeline (bounded
//! retry with backoff composed with a circuit breaker).
//!
//! It is persistence-agnostic: adapters return [`ProviderObservation`]s and
//! the domain layer decides what to do with them.

pub mod errors;
pub mod models;
pub mod provider;
pub mod resilience;

pub use errors::{RetryClass, WeatherDataError};
pub use models::{kph_to_ms, round2, ForecastDay, ProviderObservation};
pub use provider::{ForecastProvider, OpenWeatherProvider, WeatherApiProvider, WeatherProvider};
pub use resilience::{
    CircuitBreaker, CircuitBreakerConfig, CircuitState, FailureCause, FetchFailure, FetchPipeline,
    RetryPolicy,
};
