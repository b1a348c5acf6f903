//! Location repository traits.
//!
//! These traits define the contract for location persistence without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::locations_model::Location;
use crate::errors::Result;

/// Trait defining the contract for Location repository operations.
#[async_trait]
pub trait LocationRepositoryTrait: Send + Sync {
    /// Lists the enabled locations, in insertion order.
    async fn list_enabled(&self) -> Result<Vec<Location>>;
}
