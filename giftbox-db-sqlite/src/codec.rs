use chrono::{DateTime, SecondsFormat, Utc};
use giftbox_core::{BuilderState, DesignId, SCHEMA_VERSION, SavedDesign, StoreError};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

/// Column values for one `saved_designs` row.
pub struct DesignRow {
    pub id: String,
    pub name: String,
    pub saved_at: String,
    pub schema_version: i64,
    pub state_json: String,
}

impl DesignRow {
    pub fn encode(design: &SavedDesign) -> Result<Self, StoreError> {
        let state_json = serde_json::to_string(&design.state).map_err(|e| {
            StoreError::Serialization(format!("Failed to encode design {}: {}", design.id, e))
        })?;
        Ok(Self {
            id: design.id.to_string(),
            name: design.name.clone(),
            saved_at: design.saved_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            schema_version: i64::from(SCHEMA_VERSION),
            state_json,
        })
    }

    pub fn from_row(row: &SqliteRow) -> Result<Self, StoreError> {
        Ok(Self {
            id: get(row, "id")?,
            name: get(row, "name")?,
            saved_at: get(row, "saved_at")?,
            schema_version: get(row, "schema_version")?,
            state_json: get(row, "state_json")?,
        })
    }

    /// Rows written by a newer schema are refused rather than guessed at.
    pub fn decode(self) -> Result<SavedDesign, StoreError> {
        if self.schema_version > i64::from(SCHEMA_VERSION) {
            return Err(StoreError::Serialization(format!(
                "Design {} has schema version {}, newest supported is {}",
                self.id, self.schema_version, SCHEMA_VERSION
            )));
        }
        let id = DesignId::parse_str(&self.id)
            .map_err(|e| StoreError::Serialization(format!("Invalid design id '{}': {}", self.id, e)))?;
        let saved_at = DateTime::parse_from_rfc3339(&self.saved_at)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|e| {
                StoreError::Serialization(format!("Invalid saved_at '{}' for design {}: {}", self.saved_at, id, e))
            })?;
        let state: BuilderState = serde_json::from_str(&self.state_json)
            .map_err(|e| StoreError::Serialization(format!("Failed to decode design {}: {}", id, e)))?;

        Ok(SavedDesign {
            id,
            name: self.name,
            saved_at,
            state,
        })
    }
}

fn get<'r, T>(
    row: &'r SqliteRow,
    column: &str,
) -> Result<T, StoreError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(column)
        .map_err(|e| StoreError::Database(format!("Failed to read column '{}': {}", column, e)))
}
