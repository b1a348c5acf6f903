//! SQLite storage implementation for locations.

mod model;
mod repository;

pub use model::{LocationDB, NewLocationDB};
pub use repository::LocationRepository;
