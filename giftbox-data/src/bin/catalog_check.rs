use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use giftbox_core::catalog;
use giftbox_data::CatalogLoader;

/// Validate a catalog CSV file and summarize it by category.
///
/// The CSV file should have the following columns:
/// - id: unique item identifier
/// - name, description: display text
/// - category: grouping used by the catalog filter
/// - price: non-negative decimal (e.g., 12.50)
/// - tags: semicolon-separated list (may be empty)
/// - popular, is_new: true/false (empty means false)
#[derive(Parser, Debug)]
#[command(name = "giftbox-catalog-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the catalog CSV file; the bundled catalog is checked when omitted
    #[arg(short, long)]
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let items = match &args.file {
        Some(path) => {
            println!("Checking catalog: {}", path.display());
            CatalogLoader::load_path(path)
                .with_context(|| format!("Invalid catalog: {}", path.display()))?
        }
        None => {
            println!("Checking bundled catalog");
            CatalogLoader::builtin().context("Bundled catalog is invalid")?
        }
    };

    for category in catalog::categories(&items) {
        let count = items
            .iter()
            .filter(|item| item.category == category)
            .count();
        println!("  {category:<16} {count:>3} items");
    }
    println!("Catalog OK: {} items.", items.len());

    Ok(())
}
