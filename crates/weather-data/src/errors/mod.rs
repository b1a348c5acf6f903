//! Error types and retry classification for the weather data crate.
//!
//! This module provides:
//! - [`WeatherDataError`]: The main error enum for all provider operations
//! - [`RetryClass`]: Classification for determining retry behavior

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Errors that can occur while fetching data from a weather provider.
///
/// Each variant is classified into a [`RetryClass`] via the
/// [`retry_class`](Self::retry_class) method, which determines whether the
/// fetch pipeline may retry the call.
#[derive(Error, Debug)]
pub enum WeatherDataError {
    /// The request never produced a usable HTTP response (DNS, connect,
    /// timeout, TLS). Transient - retry with backoff.
    #[error("Network error: {provider} - {message}")]
    Network {
        /// The provider that was being contacted
        provider: &'static str,
        /// The underlying transport error
        message: String,
    },

    /// The provider answered with a non-2xx status other than 429.
    /// Treated as transient - upstreams routinely return 5xx blips.
    #[error("HTTP {status} from {provider}: {body}")]
    Status {
        /// The provider that returned the status
        provider: &'static str,
        /// The HTTP status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// The provider rate limited the request (HTTP 429).
    /// Terminal - retrying immediately would only extend the penalty.
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: &'static str,
    },

    /// The response body did not match the provider's documented schema.
    /// Terminal - the same payload will fail the same way.
    #[error("Malformed response from {provider}: {message}")]
    MalformedResponse {
        /// The provider that returned the payload
        provider: &'static str,
        /// Parse error detail
        message: String,
    },

    /// The circuit breaker is open for this provider; no network call was
    /// made. Terminal for this attempt.
    #[error("Circuit open: {provider}")]
    CircuitOpen {
        /// The provider with an open circuit
        provider: &'static str,
    },
}

impl WeatherDataError {
    /// Returns the retry classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use skycast_weather_data::errors::{RetryClass, WeatherDataError};
    ///
    /// let error = WeatherDataError::RateLimited { provider: "WeatherAPI" };
    /// assert_eq!(error.retry_class(), RetryClass::Terminal);
    ///
    /// let error = WeatherDataError::Network {
    ///     provider: "OpenWeatherMap",
    ///     message: "connection reset".to_string(),
    /// };
    /// assert_eq!(error.retry_class(), RetryClass::Transient);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::Network { .. } | Self::Status { .. } => RetryClass::Transient,
            Self::RateLimited { .. }
            | Self::MalformedResponse { .. }
            | Self::CircuitOpen { .. } => RetryClass::Terminal,
        }
    }

    /// The provider this error originated from.
    pub fn provider(&self) -> &'static str {
        match self {
            Self::Network { provider, .. }
            | Self::Status { provider, .. }
            | Self::RateLimited { provider }
            | Self::MalformedResponse { provider, .. }
            | Self::CircuitOpen { provider } => provider,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_is_transient() {
        let error = WeatherDataError::Network {
            provider: "OpenWeatherMap",
            message: "connection refused".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::Transient);
    }

    #[test]
    fn test_status_error_is_transient() {
        let error = WeatherDataError::Status {
            provider: "WeatherAPI",
            status: 503,
            body: "service unavailable".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::Transient);
    }

    #[test]
    fn test_rate_limited_is_terminal() {
        let error = WeatherDataError::RateLimited {
            provider: "WeatherAPI",
        };
        assert_eq!(error.retry_class(), RetryClass::Terminal);
    }

    #[test]
    fn test_malformed_response_is_terminal() {
        let error = WeatherDataError::MalformedResponse {
            provider: "OpenWeatherMap",
            message: "missing field `main`".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::Terminal);
    }

    #[test]
    fn test_circuit_open_is_terminal() {
        let error = WeatherDataError::CircuitOpen {
            provider: "OpenWeatherMap",
        };
        assert_eq!(error.retry_class(), RetryClass::Terminal);
    }

    #[test]
    fn test_error_display() {
        let error = WeatherDataError::RateLimited {
            provider: "WeatherAPI",
        };
        assert_eq!(format!("{}", error), "Rate limited: WeatherAPI");

        let error = WeatherDataError::Status {
            provider: "OpenWeatherMap",
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "HTTP 502 from OpenWeatherMap: bad gateway"
        );
    }
}
