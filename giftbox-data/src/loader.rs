use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use giftbox_core::CatalogItem;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.csv");

/// Errors that can occur when loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Failed to read catalog '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Row {line}: item id is empty")]
    MissingId { line: usize },

    #[error("Item '{id}' has a negative price ({price})")]
    NegativePrice { id: String, price: Decimal },

    #[error("Item id '{0}' appears more than once")]
    DuplicateId(String),
}

impl From<csv::Error> for CatalogLoaderError {
    fn from(err: csv::Error) -> Self {
        CatalogLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of a catalog CSV file.
///
/// Columns:
/// - `id`: unique item identifier
/// - `name`, `description`: display text (description may be empty)
/// - `category`: grouping used by the catalog filter
/// - `price`: non-negative decimal
/// - `tags`: semicolon-separated, may be empty
/// - `popular`, `is_new`: `true`/`false` (also `yes`/`no`, `1`/`0`); empty is `false`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CatalogRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub price: Decimal,
    #[serde(default)]
    pub tags: String,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub popular: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_new: bool,
}

impl CatalogRecord {
    pub fn into_item(self) -> CatalogItem {
        let tags = self
            .tags
            .split(';')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();
        CatalogItem {
            id: self.id.trim().to_string(),
            name: self.name,
            description: self.description,
            category: self.category.trim().to_string(),
            price: self.price,
            tags,
            popular: self.popular,
            is_new: self.is_new,
        }
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s.as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(true),
            "false" | "no" | "0" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected true/false, got '{other}'"
            ))),
        },
    }
}

/// Loader for the read-only item catalog.
///
/// The catalog is validated as a whole: every id must be non-empty and
/// unique, and no price may be negative. Row order is kept, since it is the
/// tie-breaker for every catalog sort.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Parse and validate catalog items from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<CatalogItem>, CatalogLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);
        let mut seen = HashSet::new();
        let mut items = Vec::new();

        for (index, result) in csv_reader.deserialize().enumerate() {
            let record: CatalogRecord = result?;
            let item = record.into_item();

            if item.id.is_empty() {
                // Header is line 1.
                return Err(CatalogLoaderError::MissingId { line: index + 2 });
            }
            if item.price.is_sign_negative() && !item.price.is_zero() {
                return Err(CatalogLoaderError::NegativePrice {
                    id: item.id,
                    price: item.price,
                });
            }
            if !seen.insert(item.id.clone()) {
                return Err(CatalogLoaderError::DuplicateId(item.id));
            }
            items.push(item);
        }

        debug!(count = items.len(), "catalog parsed");
        Ok(items)
    }

    /// Parse the catalog file at `path`.
    pub fn load_path(path: &Path) -> Result<Vec<CatalogItem>, CatalogLoaderError> {
        let file = File::open(path).map_err(|e| CatalogLoaderError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(file)
    }

    /// The catalog bundled with the crate.
    pub fn builtin() -> Result<Vec<CatalogItem>, CatalogLoaderError> {
        Self::parse(BUILTIN_CATALOG.as_bytes())
    }
}
