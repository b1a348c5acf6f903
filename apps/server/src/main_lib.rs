use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use skycast_core::locations::LocationRepositoryTrait;
use skycast_core::weather::{ForecastService, WeatherService};
use skycast_storage_sqlite::db;
use skycast_storage_sqlite::locations::LocationRepository;
use skycast_storage_sqlite::observations::ObservationRepository;
use skycast_weather_data::{
    FetchPipeline, ForecastProvider, OpenWeatherProvider, WeatherApiProvider,
};

use crate::config::Config;

pub struct AppState {
    pub weather_service: Arc<WeatherService>,
    pub forecast_service: Arc<ForecastService>,
}

pub fn init_tracing() {
    let log_format = std::env::var("SKYCAST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.data_dir)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer(pool.clone());

    let location_repository = Arc::new(LocationRepository::new(pool.clone(), writer.clone()));
    let tracked = location_repository
        .ensure_tracked(config.cities.clone())
        .await?;
    if tracked > 0 {
        tracing::info!("Tracking {} newly configured location(s)", tracked);
    }

    // The tracked set is loaded once here and fixed for the process lifetime.
    let locations = location_repository.list_enabled().await?;

    let observation_repository = Arc::new(ObservationRepository::new(pool, writer));

    let open_weather = Arc::new(OpenWeatherProvider::new(config.openweather_api_key.clone()));
    let weather_api = Arc::new(WeatherApiProvider::new(config.weatherapi_api_key.clone()));

    // Each provider gets its own retry + breaker pipeline for the sweep.
    let primary = Arc::new(FetchPipeline::new(open_weather));
    let secondary = Arc::new(FetchPipeline::new(weather_api.clone()));

    let weather_service = Arc::new(WeatherService::new(
        locations,
        observation_repository,
        primary,
        secondary,
    ));

    // Forecasts are served by the one provider that offers them, without
    // the sweep's resilience wrapping.
    let forecast_service = Arc::new(ForecastService::new(
        weather_api as Arc<dyn ForecastProvider>,
    ));

    Ok(Arc::new(AppState {
        weather_service,
        forecast_service,
    }))
}
