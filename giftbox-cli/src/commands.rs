//! Subcommands of the `giftbox` binary. Each returns the text to print.

use std::fmt::Write as _;

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use giftbox_core::catalog::{self, CatalogQuery, CatalogSort};
use giftbox_core::pricing::PriceCalculator;
use giftbox_core::{
    AddItemOutcome, BoxSize, Builder, BuilderPatch, CatalogItem, DesignId, PackagingStyle,
    SavedDesign, Studio, TOTAL_STEPS,
};
use tracing::warn;

use crate::app;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse the item catalog.
    Catalog(CatalogArgs),
    /// Price a box without saving it.
    Quote(DesignArgs),
    /// Save a box as a named design.
    Save {
        #[command(flatten)]
        design: DesignArgs,
        /// Design name; defaults to "Gift Box <date>".
        #[arg(long)]
        name: Option<String>,
    },
    /// Manage saved designs.
    Designs {
        #[command(subcommand)]
        action: DesignsCommand,
    },
    /// List the available storage backends.
    Backends,
}

#[derive(Debug, Subcommand)]
pub enum DesignsCommand {
    /// List saved designs in save order.
    List,
    /// Print one saved design as JSON.
    Show { id: DesignId },
    /// Rename a saved design. An empty name is allowed.
    Rename { id: DesignId, name: String },
    /// Delete a saved design.
    Delete { id: DesignId },
    /// Copy a saved design under "<name> (Copy)".
    Duplicate { id: DesignId },
}

#[derive(Debug, Clone, Default, Args)]
pub struct CatalogArgs {
    /// Only items in this category ("all" for every category).
    #[arg(long)]
    pub category: Option<String>,
    /// Case-insensitive text to look for in names, descriptions and tags.
    #[arg(long)]
    pub search: Option<String>,
    /// featured, price-low, price-high, name-az or newest.
    #[arg(long, default_value_t = CatalogSort::Featured)]
    pub sort: CatalogSort,
}

/// Builder settings shared by `quote` and `save`.
#[derive(Debug, Clone, Default, Args)]
pub struct DesignArgs {
    /// Start from this saved design instead of an empty box.
    #[arg(long, value_name = "DESIGN_ID")]
    pub from: Option<DesignId>,
    #[arg(long)]
    pub occasion: Option<String>,
    #[arg(long)]
    pub recipient: Option<String>,
    /// S, M or L.
    #[arg(long)]
    pub size: Option<BoxSize>,
    /// classic, luxury or eco.
    #[arg(long)]
    pub packaging: Option<PackagingStyle>,
    #[arg(long)]
    pub palette: Option<String>,
    #[arg(long)]
    pub pattern: Option<String>,
    /// Leave out the greeting card.
    #[arg(long)]
    pub no_card: bool,
    #[arg(long)]
    pub message: Option<String>,
    /// Catalog item to add; repeat for several.
    #[arg(long = "item", value_name = "ITEM_ID")]
    pub items: Vec<String>,
    /// Wizard step to leave the design on (clamped to 0..=8).
    #[arg(long, allow_negative_numbers = true)]
    pub step: Option<i64>,
}

impl DesignArgs {
    fn patch(&self) -> BuilderPatch {
        BuilderPatch {
            current_step: self.step,
            occasion: self.occasion.clone(),
            recipient_name: self.recipient.clone(),
            box_size: self.size,
            packaging_style: self.packaging,
            theme_palette: self.palette.clone(),
            theme_pattern: self.pattern.clone(),
            include_card: self.no_card.then_some(false),
            card_message: self.message.clone(),
            ..Default::default()
        }
    }
}

/// Runs `command` and persists the design collection if it changed.
pub async fn run(
    command: Command,
    studio: &mut Studio,
    catalog: &[CatalogItem],
) -> Result<String> {
    let output = match command {
        Command::Catalog(args) => browse(&args, catalog),
        Command::Quote(args) => {
            let notes = configure(studio, &args, catalog)?;
            with_notes(quote(studio.builder()), &notes)
        }
        Command::Save { design, name } => {
            let notes = configure(studio, &design, catalog)?;
            let id = studio.save_design(name.as_deref());
            let saved = lookup(studio, id)?;
            let header = format!("Saved design {} \"{}\"\n", id, saved.name);
            with_notes(header + &quote(studio.builder()), &notes)
        }
        Command::Designs { action } => designs(action, studio)?,
        Command::Backends => backends(),
    };

    if studio.is_dirty() {
        studio
            .persist()
            .await
            .context("Failed to persist saved designs")?;
    }
    Ok(output)
}

pub fn backends() -> String {
    app::build_registry()
        .available_backends()
        .iter()
        .map(|name| format!("{name}\n"))
        .collect()
}

fn browse(
    args: &CatalogArgs,
    items: &[CatalogItem],
) -> String {
    let query = CatalogQuery {
        category: args.category.clone(),
        search: args.search.clone().unwrap_or_default(),
        sort: args.sort,
    };
    let found = catalog::browse(items, &query);
    if found.is_empty() {
        return "No items match.\n".to_string();
    }

    let mut out = String::new();
    for item in found {
        let mut flags = Vec::new();
        if item.popular {
            flags.push("popular");
        }
        if item.is_new {
            flags.push("new");
        }
        let _ = writeln!(
            out,
            "{:<20} {:<28} {:<12} {:>8}  {}",
            item.id,
            item.name,
            item.category,
            item.price,
            flags.join(",")
        );
    }
    out
}

/// Applies `args` to the live builder. Returns notes about items that were
/// not added.
fn configure(
    studio: &mut Studio,
    args: &DesignArgs,
    items: &[CatalogItem],
) -> Result<Vec<String>> {
    if let Some(id) = args.from {
        if !studio.load_design(id) {
            bail!("no saved design with id {id}");
        }
    }

    let builder = studio.builder_mut();
    builder.set_partial(args.patch());

    let mut notes = Vec::new();
    for item_id in &args.items {
        let Some(item) = catalog::find(items, item_id) else {
            bail!("unknown catalog item '{item_id}'");
        };
        match builder.add_item(item.clone()) {
            AddItemOutcome::Added => {}
            AddItemOutcome::BoxFull => {
                warn!(item_id = %item_id, "box full; item skipped");
                notes.push(format!("skipped {item_id}: box is full"));
            }
            AddItemOutcome::AlreadySelected => {
                notes.push(format!("skipped {item_id}: already in the box"));
            }
        }
    }
    Ok(notes)
}

fn quote(builder: &Builder) -> String {
    let state = builder.state();
    let pricing = builder.pricing();
    let breakdown = builder.price_breakdown();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<12}{:<24}{:>10}",
        "Box",
        format!("{} ({})", state.box_size, pricing.box_tier(state.box_size).label),
        breakdown.box_price
    );
    let _ = writeln!(
        out,
        "{:<12}{:<24}{:>10}",
        "Items",
        format!("{} of {}", state.selected_items.len(), builder.max_items()),
        breakdown.items_subtotal
    );
    for item in &state.selected_items {
        let _ = writeln!(out, "  - {:<32}{:>10}", item.name, item.price);
    }
    let _ = writeln!(
        out,
        "{:<12}{:<24}{:>10}",
        "Packaging",
        format!("{} x{}", state.packaging_style, breakdown.packaging_multiplier),
        breakdown.packaged_subtotal
    );
    let _ = writeln!(out, "{:<12}{:<24}{:>10}", "Card", "", breakdown.card_price);
    let _ = writeln!(out, "{:<12}{:<24}{:>10}", "Total", "", breakdown.total);
    let _ = writeln!(
        out,
        "Step {} of {} ({}), {}% complete",
        state.current_step + 1,
        TOTAL_STEPS,
        builder.current_step().as_str(),
        builder.progress_percent()
    );
    out
}

fn with_notes(
    mut out: String,
    notes: &[String],
) -> String {
    for note in notes {
        let _ = writeln!(out, "note: {note}");
    }
    out
}

fn lookup(
    studio: &Studio,
    id: DesignId,
) -> Result<&SavedDesign> {
    studio
        .designs()
        .get(id)
        .with_context(|| format!("no saved design with id {id}"))
}

fn designs(
    action: DesignsCommand,
    studio: &mut Studio,
) -> Result<String> {
    match action {
        DesignsCommand::List => {
            if studio.designs().is_empty() {
                return Ok("No saved designs.\n".to_string());
            }
            let calculator = PriceCalculator::new(studio.builder().pricing());
            let mut out = String::new();
            for design in studio.designs().designs() {
                let _ = writeln!(
                    out,
                    "{}  {}  {}  [{} items, total {}]",
                    design.id,
                    design.saved_at.format("%Y-%m-%d %H:%M"),
                    design.name,
                    design.state.selected_items.len(),
                    calculator.total(&design.state)
                );
            }
            Ok(out)
        }
        DesignsCommand::Show { id } => {
            let design = lookup(studio, id)?;
            let json = serde_json::to_string_pretty(design).context("Failed to render design")?;
            Ok(json + "\n")
        }
        DesignsCommand::Rename { id, name } => {
            if !studio.rename_design(id, &name) {
                bail!("no saved design with id {id}");
            }
            Ok(format!("Renamed {id} to \"{name}\"\n"))
        }
        DesignsCommand::Delete { id } => {
            if !studio.delete_design(id) {
                bail!("no saved design with id {id}");
            }
            Ok(format!("Deleted {id}\n"))
        }
        DesignsCommand::Duplicate { id } => {
            let copy = studio
                .duplicate_design(id)
                .with_context(|| format!("no saved design with id {id}"))?;
            let name = &lookup(studio, copy)?.name;
            Ok(format!("Duplicated {id} as {copy} \"{name}\"\n"))
        }
    }
}
