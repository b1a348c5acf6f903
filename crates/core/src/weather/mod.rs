//! Weather module - observations, reconciliation, and the sweep/forecast services.

mod forecast_service;
mod weather_aggregator;
mod weather_model;
mod weather_service;
mod weather_traits;

// Re-export the public interface
pub use forecast_service::ForecastService;
pub use weather_aggregator::reconcile;
pub use weather_model::{
    AggregatedForecast, AggregatedForecastDay, CurrentWeather, ReconciledObservation,
    WeatherObservation,
};
pub use weather_service::WeatherService;
pub use weather_traits::ObservationRepositoryTrait;
