//! SQLite storage implementation for Skycast.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `skycast-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for locations and observations
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist. The `core` crate is database-agnostic and works with traits.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod locations;
pub mod observations;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from skycast-core for convenience
pub use skycast_core::errors::{DatabaseError, Error, Result};
