//! Locations domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tracked location whose weather is collected on every sweep.
///
/// `name` is the city name as accepted by both upstream providers and is
/// unique across the table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}
