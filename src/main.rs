use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::fs::File;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod browse;
mod catalog;
mod cli;
mod config;
mod controls;
mod filter;
mod query;
mod recommend;
mod render;

use catalog::{read_items, CatalogStore, Item};
use cli::{
    BrowseArgs, Command, FacetsArgs, RecommendArgs, RootArgs, SearchArgs, SuggestArgs,
};
use config::{resolve_settings, Settings};
use query::QueryController;
use recommend::{HttpRecommendationClient, Recommendation, RecommendationSource};
use render::{format_cards, format_facets, format_suggestions, format_table, TableView};

const LOG_ENV: &str = "MFIND_LOG";

/// Where diagnostics go for this run.
enum LogTarget {
    Stderr,
    File(PathBuf),
    Discard,
}

fn main() -> Result<()> {
    let args = RootArgs::parse();
    let target = match &args.command {
        Command::Browse(browse) => match &browse.log_file {
            Some(path) => LogTarget::File(path.clone()),
            None => LogTarget::Discard,
        },
        _ => LogTarget::Stderr,
    };
    init_logging(target)?;

    let settings = resolve_settings(&args.global)?;
    match args.command {
        Command::Search(search) => run_search(&settings, search),
        Command::Suggest(suggest) => run_suggest(&settings, suggest),
        Command::Facets(facets) => run_facets(&settings, facets),
        Command::Recommend(recommend) => run_recommend(&settings, recommend),
        Command::Browse(browse) => run_browse(&settings, browse),
    }
}

/// Install the tracing subscriber. One-shot commands log to stderr; the
/// browser logs to its `--log-file` or nowhere, so the screen stays clean.
fn init_logging(target: LogTarget) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);
    match target {
        LogTarget::Stderr => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogTarget::File(path) => {
            let file = File::create(&path)
                .with_context(|| format!("create log file {}", path.display()))?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        LogTarget::Discard => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::sink))
            .init(),
    }
    Ok(())
}

fn load_controller(settings: &Settings) -> Result<QueryController> {
    let items = read_items(&settings.catalog)
        .with_context(|| format!("load catalog from {}", settings.catalog.describe()))?;
    let mut store = CatalogStore::new();
    store.load(items)?;
    if store.is_empty() {
        tracing::warn!(
            source = %settings.catalog.describe(),
            "catalog is empty; no facet values will be offered"
        );
    }
    QueryController::new(store, settings.suggestion_limit)
}

fn recommendation_source(settings: &Settings) -> HttpRecommendationClient {
    HttpRecommendationClient::new(&settings.backend_url)
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    text: &'a str,
    results: &'a [Item],
    recommendation_base: Option<&'a str>,
    recommendations: &'a [Recommendation],
}

fn run_search(settings: &Settings, args: SearchArgs) -> Result<()> {
    let mut controller = load_controller(settings)?;
    *controller.controls_mut() = args.filters.to_controls();
    let request = controller.run_query(&args.text);
    if !args.no_recommend {
        let source = recommendation_source(settings);
        controller.resolve_lookup(request, &source);
    }

    let limit = settings.recommendation_limit.unwrap_or(usize::MAX);
    let recommendations =
        &controller.recommendations()[..controller.recommendations().len().min(limit)];
    if args.json {
        let output = SearchOutput {
            text: controller.text(),
            results: controller.results(),
            recommendation_base: controller.recommendation_base(),
            recommendations,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("serialize search output")?
        );
        return Ok(());
    }

    let mut table = TableView::default();
    table.render(controller.results());
    print!("{}", format_table(&table));
    if !args.no_recommend {
        println!();
        let cards = render::render_cards(recommendations, None);
        print!("{}", format_cards(controller.recommendation_base(), &cards));
    }
    Ok(())
}

fn run_suggest(settings: &Settings, args: SuggestArgs) -> Result<()> {
    let limit = args.limit.unwrap_or(settings.suggestion_limit);
    let controller = load_controller(settings)?;
    let matches = filter::suggest(controller.catalog().all(), &args.text, limit)
        .into_iter()
        .cloned()
        .collect::<Vec<_>>();
    print!("{}", format_suggestions(&render::render_suggestions(&matches)));
    Ok(())
}

fn run_facets(settings: &Settings, args: FacetsArgs) -> Result<()> {
    let controller = load_controller(settings)?;
    let facets = controller.catalog().facets();
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(facets).context("serialize facets")?
        );
    } else {
        print!("{}", format_facets(facets));
    }
    Ok(())
}

fn run_recommend(settings: &Settings, args: RecommendArgs) -> Result<()> {
    let source = recommendation_source(settings);
    let response = source.lookup(&args.name)?;
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&response).context("serialize recommendations")?
        );
        return Ok(());
    }
    let cards = render::render_cards(&response.recommendations, settings.recommendation_limit);
    print!("{}", format_cards(Some(&response.base_item), &cards));
    Ok(())
}

fn run_browse(settings: &Settings, _args: BrowseArgs) -> Result<()> {
    let controller = load_controller(settings)?;
    let source: Arc<dyn RecommendationSource> = Arc::new(recommendation_source(settings));
    browse::run(controller, source, settings.recommendation_limit)
}
