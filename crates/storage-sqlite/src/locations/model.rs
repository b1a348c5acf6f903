//! Database models for locations.

use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use skycast_core::locations::Location;

/// Database model for a tracked location
#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::locations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct LocationDB {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub created_at: NaiveDateTime,
}

/// Database model for inserting a location
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::locations)]
#[diesel(treat_none_as_default_value = false)]
#[serde(rename_all = "camelCase")]
pub struct NewLocationDB {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub created_at: NaiveDateTime,
}

// Conversion to domain models
impl From<LocationDB> for Location {
    fn from(db: LocationDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            enabled: db.enabled,
            created_at: DateTime::<Utc>::from_naive_utc_and_offset(db.created_at, Utc),
        }
    }
}
