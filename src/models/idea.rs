//! Content idea model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EntityId;

/// A content idea with a "used" flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: EntityId,
    pub text: String,
    #[serde(default)]
    pub used: bool,
    #[serde(default, alias = "date")]
    pub created_at: DateTime<Utc>,
}
