use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use skycast_core::weather::{
    ObservationRepositoryTrait, ReconciledObservation, WeatherObservation,
};
use skycast_core::Result;

use super::model::{ReconciledObservationDB, WeatherObservationDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{locations, reconciled_observations, weather_observations};

pub struct ObservationRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ObservationRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ObservationRepository { pool, writer }
    }
}

#[async_trait]
impl ObservationRepositoryTrait for ObservationRepository {
    async fn save_sweep(
        &self,
        raws: Vec<WeatherObservation>,
        reconciled: ReconciledObservation,
    ) -> Result<()> {
        // One writer job is one immediate transaction: the raw rows and the
        // reconciled row commit together or not at all.
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let raw_rows: Vec<WeatherObservationDB> =
                    raws.into_iter().map(WeatherObservationDB::from).collect();

                diesel::insert_into(weather_observations::table)
                    .values(&raw_rows)
                    .execute(conn)
                    .into_core()?;

                diesel::insert_into(reconciled_observations::table)
                    .values(ReconciledObservationDB::from(reconciled))
                    .execute(conn)
                    .into_core()?;

                Ok(())
            })
            .await
    }

    async fn latest_reconciled_for_city(&self, city: &str) -> Result<ReconciledObservation> {
        let mut conn = get_connection(&self.pool)?;
        let row = reconciled_observations::table
            .inner_join(locations::table)
            .filter(locations::name.eq(city))
            .order(reconciled_observations::created_at.desc())
            .select(ReconciledObservationDB::as_select())
            .first::<ReconciledObservationDB>(&mut conn)
            .into_core()?;
        Ok(ReconciledObservation::from(row))
    }
}
