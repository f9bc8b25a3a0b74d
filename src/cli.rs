//! CLI argument parsing.
//!
//! Every subcommand drives the same query controller the interactive
//! browser uses; the CLI only decides where input comes from and how the
//! result is printed.
use crate::catalog::Nutrient;
use crate::controls::{parse_seal_mode, FilterControls};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mfind",
    version,
    about = "Search and filter a food-item catalog with backend recommendations",
    after_help = "Examples:\n  mfind --catalog items.json search salad --seal none\n  mfind --catalog items.json suggest caes\n  mfind facets --json\n  mfind recommend \"Caesar Salad\"\n  mfind browse --log-file /tmp/mfind.log",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags shared by every subcommand.
#[derive(Args, Debug, Default, Clone)]
pub struct GlobalArgs {
    /// Config file (defaults to <config dir>/menu-finder/config.json when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Catalog JSON file; when absent the catalog is fetched from the backend
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Backend base URL serving /platos and /recomendar
    #[arg(long, global = true, value_name = "URL")]
    pub backend: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Search(SearchArgs),
    Suggest(SuggestArgs),
    Facets(FacetsArgs),
    Recommend(RecommendArgs),
    Browse(BrowseArgs),
}

#[derive(Parser, Debug)]
#[command(about = "Run one query and print results with recommendations")]
pub struct SearchArgs {
    /// Name text to match (case-insensitive substring; empty matches all)
    #[arg(default_value = "")]
    pub text: String,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Skip the recommendation lookup
    #[arg(long)]
    pub no_recommend: bool,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

/// Filter flags mirroring the interactive filter controls.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Only items from this restaurant
    #[arg(long, value_name = "NAME")]
    pub restaurant: Option<String>,

    /// Only items in this category
    #[arg(long, value_name = "NAME")]
    pub category: Option<String>,

    /// Seal filter: any, none, or a seal label
    #[arg(long, value_name = "SEAL", default_value = "any")]
    pub seal: String,

    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub min_calories: Option<f64>,
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub max_calories: Option<f64>,
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub min_protein: Option<f64>,
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub max_protein: Option<f64>,
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub min_fat: Option<f64>,
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub max_fat: Option<f64>,
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub min_carbs: Option<f64>,
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub max_carbs: Option<f64>,
}

impl FilterArgs {
    /// Fill the controls the way a user would fill the filter form.
    pub fn to_controls(&self) -> FilterControls {
        let mut controls = FilterControls {
            restaurant: self.restaurant.clone(),
            category: self.category.clone(),
            seal: parse_seal_mode(&self.seal),
            ..FilterControls::default()
        };
        let bounds = [
            (Nutrient::Calories, self.min_calories, self.max_calories),
            (Nutrient::Protein, self.min_protein, self.max_protein),
            (Nutrient::Fat, self.min_fat, self.max_fat),
            (Nutrient::Carbs, self.min_carbs, self.max_carbs),
        ];
        for (nutrient, min, max) in bounds {
            let input = controls.range_input_mut(nutrient);
            input.min = min.map(|v| v.to_string()).unwrap_or_default();
            input.max = max.map(|v| v.to_string()).unwrap_or_default();
        }
        controls
    }
}

#[derive(Parser, Debug)]
#[command(about = "List autocomplete matches for a partial name")]
pub struct SuggestArgs {
    pub text: String,

    /// Maximum entries (defaults to the configured suggestion limit)
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,
}

#[derive(Parser, Debug)]
#[command(about = "List restaurant, category and seal filter values")]
pub struct FacetsArgs {
    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Fetch recommendations for one item name")]
pub struct RecommendArgs {
    pub name: String,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Browse the catalog in an interactive terminal UI")]
pub struct BrowseArgs {
    /// Write logs to this file (the UI otherwise discards them)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
