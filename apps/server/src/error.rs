//! HTTP error mapping.
//!
//! Every failure leaving a handler is rendered as the same JSON envelope:
//! `{"error": "...", "status": 404, "time": "..."}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use skycast_core::errors::{DatabaseError, Error};

pub type ApiResult<T> = Result<T, ApiError>;

/// An HTTP-facing error: a status code plus a message for the envelope.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

#[derive(Serialize)]
struct ErrorEnvelope {
    error: String,
    status: u16,
    time: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorEnvelope {
            error: self.message,
            status: self.status.as_u16(),
            time: Utc::now().to_rfc3339(),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match &err {
            Error::Validation(message) => Self::bad_request(message.clone()),
            Error::Database(DatabaseError::NotFound(_)) => Self::not_found(err.to_string()),
            // Upstream provider failures surface as 502 on the on-demand path.
            Error::WeatherData(_) => Self {
                status: StatusCode::BAD_GATEWAY,
                message: err.to_string(),
            },
            _ => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: err.to_string(),
            },
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycast_weather_data::WeatherDataError;

    #[test]
    fn test_envelope_shape() {
        let response = ApiError::not_found("no data for city 'Atlantis'");
        assert_eq!(response.status, StatusCode::NOT_FOUND);

        let body = ErrorEnvelope {
            error: response.message.clone(),
            status: response.status.as_u16(),
            time: Utc::now().to_rfc3339(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "no data for city 'Atlantis'");
        assert_eq!(json["status"], 404);
        assert!(json["time"].is_string());
    }

    #[test]
    fn test_core_error_mapping() {
        let err = ApiError::from(Error::Validation("days must be between 1 and 7".into()));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err = ApiError::from(Error::Database(DatabaseError::NotFound("Paris".into())));
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err = ApiError::from(Error::Database(DatabaseError::QueryFailed("boom".into())));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);

        let err = ApiError::from(Error::WeatherData(WeatherDataError::RateLimited {
            provider: "WeatherAPI",
        }));
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    }
}
