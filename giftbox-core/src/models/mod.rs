mod box_size;
mod builder_state;
mod catalog_item;
mod packaging_style;
mod saved_design;

use thiserror::Error;

pub use box_size::BoxSize;
pub use builder_state::{BuilderState, BuilderStep, TOTAL_STEPS};
pub use catalog_item::CatalogItem;
pub use packaging_style::PackagingStyle;
pub use saved_design::{DesignId, SavedDesign};

/// Returned when a textual token does not name a known enum variant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseTokenError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

impl ParseTokenError {
    pub(crate) fn new(
        kind: &'static str,
        value: &str,
        expected: &'static str,
    ) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}
