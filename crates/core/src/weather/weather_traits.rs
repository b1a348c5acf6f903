//! Observation repository traits.

use async_trait::async_trait;

use super::weather_model::{ReconciledObservation, WeatherObservation};
use crate::errors::Result;

/// Trait defining the contract for observation persistence.
#[async_trait]
pub trait ObservationRepositoryTrait: Send + Sync {
    /// Persists one sweep outcome for one location: both raw observations
    /// and the reconciled reading, in a single transaction.
    ///
    /// Either all three rows are written or none of them are.
    async fn save_sweep(
        &self,
        raws: Vec<WeatherObservation>,
        reconciled: ReconciledObservation,
    ) -> Result<()>;

    /// Returns the most recent reconciled observation for the location with
    /// the given name.
    ///
    /// Fails with [`DatabaseError::NotFound`](crate::errors::DatabaseError)
    /// when the location is unknown or no sweep has stored data for it yet.
    async fn latest_reconciled_for_city(&self, city: &str) -> Result<ReconciledObservation>;
}
