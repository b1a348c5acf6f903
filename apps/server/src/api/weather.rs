use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use skycast_core::weather::{AggregatedForecast, CurrentWeather};

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

#[derive(Deserialize)]
struct CurrentParams {
    city: Option<String>,
}

/// Latest reconciled reading for a tracked city.
async fn get_current(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CurrentParams>,
) -> ApiResult<Json<CurrentWeather>> {
    let city = require_city(params.city)?;
    let current = state.weather_service.current(&city).await?;
    Ok(Json(current))
}

#[derive(Deserialize)]
struct ForecastParams {
    city: Option<String>,
    days: Option<String>,
}

/// On-demand forecast for a city, 1 to 7 days out.
async fn get_forecast(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ForecastParams>,
) -> ApiResult<Json<AggregatedForecast>> {
    let city = require_city(params.city)?;

    // A missing days parameter is not defaulted: it stays at zero and is
    // rejected by the forecast service's range check.
    let days = match params.days {
        Some(raw) => raw
            .parse::<u8>()
            .map_err(|_| ApiError::bad_request(format!("invalid days value '{}'", raw)))?,
        None => 0,
    };

    let forecast = state.forecast_service.forecast(&city, days).await?;
    Ok(Json(forecast))
}

fn require_city(city: Option<String>) -> Result<String, ApiError> {
    match city {
        Some(city) if !city.trim().is_empty() => Ok(city.trim().to_string()),
        _ => Err(ApiError::bad_request("city query parameter is required")),
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/weather/current", get(get_current))
        .route("/weather/forecast", get(get_forecast))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use tower::ServiceExt;

    use skycast_core::errors::{DatabaseError, Error, Result as CoreResult};
    use skycast_core::weather::{
        ForecastService, ObservationRepositoryTrait, ReconciledObservation, WeatherObservation,
        WeatherService,
    };
    use skycast_weather_data::{
        FetchPipeline, ForecastDay, ProviderObservation, WeatherDataError, WeatherProvider,
    };

    use crate::api::app_router;

    struct OfflineProvider(&'static str);

    #[async_trait]
    impl WeatherProvider for OfflineProvider {
        fn id(&self) -> &'static str {
            self.0
        }

        async fn current(
            &self,
            _: &str,
        ) -> std::result::Result<ProviderObservation, WeatherDataError> {
            Err(WeatherDataError::RateLimited { provider: self.0 })
        }
    }

    struct EmptyStore;

    #[async_trait]
    impl ObservationRepositoryTrait for EmptyStore {
        async fn save_sweep(
            &self,
            _: Vec<WeatherObservation>,
            _: ReconciledObservation,
        ) -> CoreResult<()> {
            Ok(())
        }

        async fn latest_reconciled_for_city(&self, city: &str) -> CoreResult<ReconciledObservation> {
            Err(Error::Database(DatabaseError::NotFound(city.to_string())))
        }
    }

    struct FixedForecast;

    #[async_trait]
    impl skycast_weather_data::ForecastProvider for FixedForecast {
        fn id(&self) -> &'static str {
            "WeatherAPI"
        }

        async fn forecast(
            &self,
            _: &str,
            days: u8,
        ) -> std::result::Result<Vec<ForecastDay>, WeatherDataError> {
            Ok((0..days)
                .map(|i| ForecastDay {
                    date: NaiveDate::from_ymd_opt(2025, 6, 10 + i as u32).unwrap(),
                    temperature: 18.0,
                    humidity: 60,
                    wind_speed: 5.0,
                    description: "sunny".to_string(),
                })
                .collect())
        }
    }

    fn test_router() -> axum::Router {
        let weather_service = Arc::new(WeatherService::new(
            vec![],
            Arc::new(EmptyStore),
            Arc::new(FetchPipeline::new(Arc::new(OfflineProvider("OpenWeatherMap")))),
            Arc::new(FetchPipeline::new(Arc::new(OfflineProvider("WeatherAPI")))),
        ));
        let forecast_service = Arc::new(ForecastService::new(Arc::new(FixedForecast)));

        app_router(Arc::new(AppState {
            weather_service,
            forecast_service,
        }))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_require_city() {
        assert_eq!(require_city(Some("Paris".to_string())).unwrap(), "Paris");
        assert_eq!(
            require_city(Some("  Paris  ".to_string())).unwrap(),
            "Paris"
        );
        assert!(require_city(Some("   ".to_string())).is_err());
        assert!(require_city(None).is_err());
    }

    #[tokio::test]
    async fn test_forecast_without_days_is_rejected() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/weather/forecast?city=Paris")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["status"], 400);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("days must be between 1 and 7"));
    }

    #[tokio::test]
    async fn test_forecast_with_valid_days() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/weather/forecast?city=Paris&days=3")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["city"], "Paris");
        assert_eq!(body["days"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_current_unknown_city_is_404() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/weather/current?city=Atlantis")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["status"], 404);
        assert!(body["time"].is_string());
    }
}
