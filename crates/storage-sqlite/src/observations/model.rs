//! Database models for weather observations.

use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use skycast_core::weather::{ReconciledObservation, WeatherObservation};

use crate::locations::LocationDB;

/// Database model for a raw per-provider observation
#[derive(
    Insertable,
    Queryable,
    Identifiable,
    Associations,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(LocationDB, foreign_key = location_id))]
#[diesel(table_name = crate::schema::weather_observations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct WeatherObservationDB {
    pub id: String,
    pub location_id: String,
    pub source: String,
    pub temperature: f64,
    pub humidity: i32,
    pub wind_speed: f64,
    pub condition: String,
    pub created_at: NaiveDateTime,
}

/// Database model for a reconciled observation
#[derive(
    Insertable,
    Queryable,
    Identifiable,
    Associations,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(LocationDB, foreign_key = location_id))]
#[diesel(table_name = crate::schema::reconciled_observations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ReconciledObservationDB {
    pub id: String,
    pub location_id: String,
    pub temperature: f64,
    pub humidity: i32,
    pub wind_speed: f64,
    pub created_at: NaiveDateTime,
}

// Conversions between domain and database models

impl From<WeatherObservation> for WeatherObservationDB {
    fn from(domain: WeatherObservation) -> Self {
        Self {
            id: domain.id,
            location_id: domain.location_id,
            source: domain.source,
            temperature: domain.temperature,
            humidity: domain.humidity,
            wind_speed: domain.wind_speed,
            condition: domain.condition,
            created_at: domain.created_at.naive_utc(),
        }
    }
}

impl From<WeatherObservationDB> for WeatherObservation {
    fn from(db: WeatherObservationDB) -> Self {
        Self {
            id: db.id,
            location_id: db.location_id,
            source: db.source,
            temperature: db.temperature,
            humidity: db.humidity,
            wind_speed: db.wind_speed,
            condition: db.condition,
            created_at: DateTime::<Utc>::from_naive_utc_and_offset(db.created_at, Utc),
        }
    }
}

impl From<ReconciledObservation> for ReconciledObservationDB {
    fn from(domain: ReconciledObservation) -> Self {
        Self {
            id: domain.id,
            location_id: domain.location_id,
            temperature: domain.temperature,
            humidity: domain.humidity,
            wind_speed: domain.wind_speed,
            created_at: domain.created_at.naive_utc(),
        }
    }
}

impl From<ReconciledObservationDB> for ReconciledObservation {
    fn from(db: ReconciledObservationDB) -> Self {
        Self {
            id: db.id,
            location_id: db.location_id,
            temperature: db.temperature,
            humidity: db.humidity,
            wind_speed: db.wind_speed,
            created_at: DateTime::<Utc>::from_naive_utc_and_offset(db.created_at, Utc),
        }
    }
}
