//! Skycast Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for the Skycast weather
//! aggregator. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` crate.

pub mod errors;
pub mod locations;
pub mod weather;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
