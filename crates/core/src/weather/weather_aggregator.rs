//! Reconciliation of two raw observations into one merged reading.

use uuid::Uuid;

use skycast_weather_data::round2;

use super::weather_model::{ReconciledObservation, WeatherObservation};

/// Merges two raw observations of the same location into one reconciled
/// reading.
///
/// Temperature is the arithmetic mean. Humidity is the integer mean,
/// truncated toward zero. Wind speed is the mean rounded to 2 decimal
/// places. The reconciled row reuses the raws' shared `created_at` so the
/// whole sweep outcome carries one timestamp.
pub fn reconcile(a: &WeatherObservation, b: &WeatherObservation) -> ReconciledObservation {
    ReconciledObservation {
        id: Uuid::new_v4().to_string(),
        location_id: a.location_id.clone(),
        temperature: (a.temperature + b.temperature) / 2.0,
        humidity: (a.humidity + b.humidity) / 2,
        wind_speed: round2((a.wind_speed + b.wind_speed) / 2.0),
        created_at: a.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_observation(
        location_id: &str,
        source: &str,
        temperature: f64,
        humidity: i32,
        wind_speed: f64,
    ) -> WeatherObservation {
        WeatherObservation {
            id: Uuid::new_v4().to_string(),
            location_id: location_id.to_string(),
            source: source.to_string(),
            temperature,
            humidity,
            wind_speed,
            condition: "clear".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_reconcile_means() {
        // OpenWeatherMap reports 10.0°C / 80% / 3.0 m/s, WeatherAPI reports
        // 12.0°C / 70% / 5.0 km/h (1.39 m/s after normalization).
        let a = test_observation("loc-paris", "OpenWeatherMap", 10.0, 80, 3.0);
        let b = test_observation("loc-paris", "WeatherAPI", 12.0, 70, 1.39);

        let merged = reconcile(&a, &b);
        assert_eq!(merged.location_id, "loc-paris");
        assert_eq!(merged.temperature, 11.0);
        assert_eq!(merged.humidity, 75);
        // (3.0 + 1.39) / 2 = 2.195, rounded half away from zero.
        assert_eq!(merged.wind_speed, 2.2);
    }

    #[test]
    fn test_reconcile_humidity_truncates() {
        let a = test_observation("loc", "A", 0.0, 81, 0.0);
        let b = test_observation("loc", "B", 0.0, 70, 0.0);
        // (81 + 70) / 2 = 75.5, truncated to 75.
        assert_eq!(reconcile(&a, &b).humidity, 75);
    }

    #[test]
    fn test_reconcile_negative_temperatures() {
        let a = test_observation("loc", "A", -5.0, 50, 1.0);
        let b = test_observation("loc", "B", -6.5, 50, 1.0);
        let merged = reconcile(&a, &b);
        assert_eq!(merged.temperature, -5.75);
        assert_eq!(merged.wind_speed, 1.0);
    }

    #[test]
    fn test_reconcile_keeps_raw_timestamp() {
        let a = test_observation("loc", "A", 1.0, 10, 1.0);
        let b = test_observation("loc", "B", 2.0, 20, 2.0);
        assert_eq!(reconcile(&a, &b).created_at, a.created_at);
    }
}
