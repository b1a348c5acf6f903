//! SQLite storage implementation for raw and reconciled observations.

mod model;
mod repository;

pub use model::{ReconciledObservationDB, WeatherObservationDB};
pub use repository::ObservationRepository;
