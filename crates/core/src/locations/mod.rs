//! Locations module - domain models and traits.

mod locations_model;
mod locations_traits;

// Re-export the public interface
pub use locations_model::Location;
pub use locations_traits::LocationRepositoryTrait;
