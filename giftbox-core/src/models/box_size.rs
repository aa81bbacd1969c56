use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ParseTokenError;

/// Capacity and price tier of a gift box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoxSize {
    #[serde(rename = "S")]
    Small,
    #[default]
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "L")]
    Large,
}

impl BoxSize {
    pub fn all() -> &'static [BoxSize] {
        &[BoxSize::Small, BoxSize::Medium, BoxSize::Large]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "S",
            Self::Medium => "M",
            Self::Large => "L",
        }
    }

    /// Accepts the short code (`S`, `M`, `L`) in either case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "S" => Some(Self::Small),
            "M" => Some(Self::Medium),
            "L" => Some(Self::Large),
            _ => None,
        }
    }
}

impl fmt::Display for BoxSize {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoxSize {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseTokenError::new("box size", s, "S, M, L"))
    }
}
