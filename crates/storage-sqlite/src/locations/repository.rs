use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use skycast_core::locations::{Location, LocationRepositoryTrait};
use skycast_core::Result;

use super::model::{LocationDB, NewLocationDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::locations;

pub struct LocationRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl LocationRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        LocationRepository { pool, writer }
    }

    /// Inserts any of the given city names that are not tracked yet.
    ///
    /// Used at startup to sync the configured city list into the table;
    /// existing rows are left untouched.
    pub async fn ensure_tracked(&self, names: Vec<String>) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let now = Utc::now().naive_utc();
                let rows: Vec<NewLocationDB> = names
                    .into_iter()
                    .map(|name| NewLocationDB {
                        id: Uuid::new_v4().to_string(),
                        name,
                        enabled: true,
                        created_at: now,
                    })
                    .collect();

                diesel::insert_into(locations::table)
                    .values(rows)
                    .on_conflict(locations::name)
                    .do_nothing()
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    /// Retrieves a location by its (unique) name.
    pub async fn get_by_name(&self, location_name: &str) -> Result<Location> {
        let mut conn = get_connection(&self.pool)?;
        let row = locations::table
            .filter(locations::name.eq(location_name))
            .first::<LocationDB>(&mut conn)
            .into_core()?;
        Ok(Location::from(row))
    }
}

#[async_trait]
impl LocationRepositoryTrait for LocationRepository {
    async fn list_enabled(&self) -> Result<Vec<Location>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = locations::table
            .filter(locations::enabled.eq(true))
            .order(locations::created_at.asc())
            .load::<LocationDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Location::from).collect())
    }
}
