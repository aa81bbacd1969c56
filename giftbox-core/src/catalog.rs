//! Browsing over a catalog: category filter, text search and sorting.
//!
//! Everything here is a pure function of the item list; the catalog itself
//! is read-only input loaded elsewhere.

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CatalogItem;
use crate::models::ParseTokenError;

/// Category name that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// Sort orders offered by the catalog browser. All sorts are stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogSort {
    /// Popular items first, otherwise catalog order.
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    /// Case-insensitive by name.
    NameAz,
    /// New items first, otherwise catalog order.
    Newest,
}

impl CatalogSort {
    pub fn all() -> &'static [CatalogSort] {
        &[
            CatalogSort::Featured,
            CatalogSort::PriceLow,
            CatalogSort::PriceHigh,
            CatalogSort::NameAz,
            CatalogSort::Newest,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::NameAz => "name-az",
            Self::Newest => "newest",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|sort| sort.as_str().eq_ignore_ascii_case(s.trim()))
    }

    fn apply(
        &self,
        items: &mut [&CatalogItem],
    ) {
        match self {
            Self::Featured => items.sort_by_key(|item| Reverse(item.popular)),
            Self::PriceLow => items.sort_by(|a, b| a.price.cmp(&b.price)),
            Self::PriceHigh => items.sort_by(|a, b| b.price.cmp(&a.price)),
            Self::NameAz => items.sort_by_cached_key(|item| item.name.to_lowercase()),
            Self::Newest => items.sort_by_key(|item| Reverse(item.is_new)),
        }
    }
}

impl fmt::Display for CatalogSort {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogSort {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            ParseTokenError::new(
                "sort order",
                s,
                "featured, price-low, price-high, name-az, newest",
            )
        })
    }
}

/// Filter and sort settings for [`browse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogQuery {
    /// Exact category to keep; `None` or `"all"` keeps every category.
    pub category: Option<String>,
    /// Case-insensitive substring matched against name, description, tags
    /// and category. Blank matches everything.
    pub search: String,
    pub sort: CatalogSort,
}

impl CatalogQuery {
    /// True when the query would return the catalog in featured order.
    pub fn is_default(&self) -> bool {
        self.category_filter().is_none()
            && self.search.trim().is_empty()
            && self.sort == CatalogSort::Featured
    }

    fn category_filter(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|category| *category != ALL_CATEGORIES)
    }

    fn matches(
        &self,
        item: &CatalogItem,
        needle: &str,
    ) -> bool {
        if let Some(category) = self.category_filter() {
            if item.category != category {
                return false;
            }
        }
        if needle.is_empty() {
            return true;
        }
        item.name.to_lowercase().contains(needle)
            || item.description.to_lowercase().contains(needle)
            || item.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
            || item.category.to_lowercase().contains(needle)
    }
}

/// Items of `catalog` that satisfy `query`, in the requested order.
pub fn browse<'a>(
    catalog: &'a [CatalogItem],
    query: &CatalogQuery,
) -> Vec<&'a CatalogItem> {
    let needle = query.search.trim().to_lowercase();
    let mut items: Vec<&CatalogItem> = catalog
        .iter()
        .filter(|item| query.matches(item, &needle))
        .collect();
    query.sort.apply(&mut items);
    items
}

/// Distinct categories in the order they first appear.
pub fn categories(catalog: &[CatalogItem]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for item in catalog {
        if !seen.contains(&item.category.as_str()) {
            seen.push(&item.category);
        }
    }
    seen
}

/// The catalog entry with `id`.
pub fn find<'a>(
    catalog: &'a [CatalogItem],
    id: &str,
) -> Option<&'a CatalogItem> {
    catalog.iter().find(|item| item.id == id)
}
