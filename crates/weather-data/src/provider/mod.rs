//! Provider implementations for weather data.

mod open_weather;
mod traits;
mod weather_api;

pub use open_weather::OpenWeatherProvider;
pub use traits::{ForecastProvider, WeatherProvider};
pub use weather_api::WeatherApiProvider;

use std::time::Duration;

use crate::errors::WeatherDataError;

/// Default HTTP request timeout applied by every adapter's client.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the shared reqwest client used by the adapters.
pub(crate) fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Perform a GET and classify the transport/status outcome.
///
/// Returns the response body on 2xx. 429 maps to `RateLimited` (terminal),
/// any other non-2xx to `Status` (transient), transport failures to
/// `Network` (transient). Payload parsing is left to the adapter.
pub(crate) async fn fetch_text(
    client: &reqwest::Client,
    provider: &'static str,
    url: &str,
) -> Result<String, WeatherDataError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| WeatherDataError::Network {
            provider,
            message: e.to_string(),
        })?;

    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(WeatherDataError::RateLimited { provider });
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(WeatherDataError::Status {
            provider,
            status: status.as_u16(),
            body,
        });
    }

    response.text().await.map_err(|e| WeatherDataError::Network {
        provider,
        message: e.to_string(),
    })
}
