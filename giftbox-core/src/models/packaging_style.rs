use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ParseTokenError;

/// Packaging finish; each style carries a price multiplier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackagingStyle {
    #[default]
    Classic,
    Luxury,
    Eco,
}

impl PackagingStyle {
    pub fn all() -> &'static [PackagingStyle] {
        &[
            PackagingStyle::Classic,
            PackagingStyle::Luxury,
            PackagingStyle::Eco,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Luxury => "luxury",
            Self::Eco => "eco",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Some(Self::Classic),
            "luxury" => Some(Self::Luxury),
            "eco" => Some(Self::Eco),
            _ => None,
        }
    }
}

impl fmt::Display for PackagingStyle {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackagingStyle {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
            .ok_or_else(|| ParseTokenError::new("packaging style", s, "classic, luxury, eco"))
    }
}
