//! Environment-driven server configuration.

use std::time::Duration;

use anyhow::{bail, Context};

/// Default bind address for the HTTP API.
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Default directory holding the SQLite database.
const DEFAULT_DATA_DIR: &str = "./data";

/// Default collection sweep interval.
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 15 * 60;

/// Cities tracked out of the box; overridable with `SKYCAST_CITIES`.
const DEFAULT_CITIES: &str = "London,Paris,Berlin";

pub struct Config {
    pub listen_addr: String,
    pub data_dir: String,
    pub openweather_api_key: String,
    pub weatherapi_api_key: String,
    pub cities: Vec<String>,
    pub sweep_interval: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let listen_addr = std::env::var("SKYCAST_LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());
        let data_dir =
            std::env::var("SKYCAST_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());

        let openweather_api_key = std::env::var("OPENWEATHER_API_KEY")
            .context("OPENWEATHER_API_KEY must be set")?;
        let weatherapi_api_key =
            std::env::var("WEATHERAPI_API_KEY").context("WEATHERAPI_API_KEY must be set")?;

        let cities: Vec<String> = std::env::var("SKYCAST_CITIES")
            .unwrap_or_else(|_| DEFAULT_CITIES.to_string())
            .split(',')
            .map(|city| city.trim().to_string())
            .filter(|city| !city.is_empty())
            .collect();
        if cities.is_empty() {
            bail!("SKYCAST_CITIES must name at least one city");
        }

        let sweep_interval_secs = match std::env::var("SKYCAST_SWEEP_INTERVAL_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .context("SKYCAST_SWEEP_INTERVAL_SECS must be a number of seconds")?,
            Err(_) => DEFAULT_SWEEP_INTERVAL_SECS,
        };
        if sweep_interval_secs == 0 {
            bail!("SKYCAST_SWEEP_INTERVAL_SECS must be greater than zero");
        }

        Ok(Self {
            listen_addr,
            data_dir,
            openweather_api_key,
            weatherapi_api_key,
            cities,
            sweep_interval: Duration::from_secs(sweep_interval_secs),
        })
    }
}
