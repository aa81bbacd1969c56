use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::BuilderState;

/// Identifier of a saved design.
pub type DesignId = Uuid;

/// A named snapshot of a builder configuration.
///
/// `state` is an owned copy; it never shares data with the live builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedDesign {
    pub id: DesignId,
    pub name: String,
    pub saved_at: DateTime<Utc>,
    pub state: BuilderState,
}
