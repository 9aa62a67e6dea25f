use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pricewatch_client::{ReqwestFetcher, ScraperExtractor};
use pricewatch_core::keywords::load_keywords;
use pricewatch_core::models::{ConditionFilter, SearchConfig, SearchMode, DEFAULT_MAX_PAGES};
use pricewatch_core::price::format_price_de;
use pricewatch_core::{SearchService, TrendAggregator};
use pricewatch_db::{Database, DatabaseConfig};

mod export;

#[derive(Parser)]
#[command(name = "pricewatch", version, about = "Marketplace listing price tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search current listings, persist the batch, and export a CSV
    Track {
        /// Search term
        #[arg(short, long)]
        query: String,

        /// Comma-separated condition selectors:
        /// 1=Neu, 2=Neuwertig, 3=Sehr gut, 4=Gut, 5=Akzeptabel, 6=Alle
        #[arg(short, long, default_value = "6")]
        conditions: String,

        /// Search mode selector: 1=buy-now, 2=completed, 3=sold
        #[arg(short, long, default_value = "1")]
        mode: String,

        /// Result pages to fetch
        #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
        max_pages: u32,

        /// Keyword exclusion list, one keyword per line
        #[arg(long, default_value = "filter_keywords.txt")]
        exclude_file: PathBuf,

        /// Language exclusion list, one keyword per line
        #[arg(long, default_value = "language_keywords.txt")]
        language_file: PathBuf,

        /// Skip persisting the batch (requires no database)
        #[arg(long, default_value_t = false)]
        no_save: bool,

        /// CSV output path (defaults to a name derived from the query)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print stored price series for one or more search terms
    Trend {
        /// Search term (repeatable for comparison)
        #[arg(short, long, required = true)]
        query: Vec<String>,
    },

    /// Show recent observations for a search term
    History {
        /// Search term
        #[arg(short, long)]
        query: String,

        /// Number of observations to show
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Setup tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Track {
            query,
            conditions,
            mode,
            max_pages,
            exclude_file,
            language_file,
            no_save,
            out,
        } => {
            cmd_track(
                &query,
                &conditions,
                &mode,
                max_pages,
                &exclude_file,
                &language_file,
                no_save,
                out,
            )
            .await?;
        }
        Commands::Trend { query } => {
            cmd_trend(&query).await?;
        }
        Commands::History { query, limit } => {
            cmd_history(&query, limit).await?;
        }
    }

    Ok(())
}

/// Open the database and make sure the schema exists.
async fn connect_db() -> Result<Database> {
    let config = DatabaseConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;
    let db = Database::connect(&config)
        .await
        .context("Failed to open database")?;
    db.ensure_schema().await.map_err(|e| anyhow::anyhow!(e))?;
    Ok(db)
}

#[allow(clippy::too_many_arguments)]
async fn cmd_track(
    query: &str,
    conditions: &str,
    mode: &str,
    max_pages: u32,
    exclude_file: &PathBuf,
    language_file: &PathBuf,
    no_save: bool,
    out: Option<PathBuf>,
) -> Result<()> {
    let config = SearchConfig::new(query.trim())
        .with_conditions(ConditionFilter::from_selectors(conditions))
        .with_exclude_keywords(load_keywords(exclude_file))
        .with_exclude_languages(load_keywords(language_file))
        .with_mode(SearchMode::from_selector_or_default(mode))
        .with_max_pages(max_pages);

    let fetcher = ReqwestFetcher::new().map_err(|e| anyhow::anyhow!(e))?;
    let extractor = ScraperExtractor::new().map_err(|e| anyhow::anyhow!(e))?;
    let listings = SearchService::new(fetcher, extractor)
        .search(&config)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    if listings.is_empty() {
        println!("No items found for '{}'.", config.search_term);
        return Ok(());
    }

    if !no_save {
        let db = connect_db().await?;
        let written = db
            .observation_repo()
            .append_batch(&config.search_term, &listings)
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        tracing::info!(rows = written, "Observation batch persisted");
    }

    let out_path = out.unwrap_or_else(|| export::default_csv_path(&config.search_term, conditions));
    export::write_csv(&out_path, &listings)?;
    println!("Saved {} listings to {}", listings.len(), out_path.display());

    if let Some(summary) = export::summarize(&listings) {
        println!(
            "Median price for '{}': {}",
            config.search_term,
            format_price_de(summary.median)
        );
        println!("Lowest price:  {}", format_price_de(summary.lowest));
        println!("Highest price: {}", format_price_de(summary.highest));
    }

    Ok(())
}

async fn cmd_trend(queries: &[String]) -> Result<()> {
    let db = connect_db().await?;
    let aggregator = TrendAggregator::new(db.observation_repo());

    let combined = aggregator
        .combined_series(queries)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    for series in &combined {
        if series.is_empty() {
            println!("No price history for '{}'.", series.search_query);
            continue;
        }

        println!(
            "Price trend for '{}' ({} observations):",
            series.search_query,
            series.len()
        );
        for point in &series.points {
            println!(
                "  {}  {}",
                point.observed_at.format("%Y-%m-%d %H:%M:%S UTC"),
                format_price_de(point.price)
            );
        }
        println!();
    }

    Ok(())
}

async fn cmd_history(query: &str, limit: usize) -> Result<()> {
    let db = connect_db().await?;
    let history = db
        .observation_repo()
        .history(query, limit)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    if history.is_empty() {
        println!("No observations found for '{query}'.");
        return Ok(());
    }

    println!("Recent observations for '{query}':\n");
    for observation in &history {
        println!(
            "  {}  {:>12}  {}  {}",
            observation.observed_at.format("%Y-%m-%d %H:%M:%S UTC"),
            format_price_de(observation.price),
            observation.condition,
            observation.title,
        );
    }
    println!("\nTotal: {} observations", history.len());

    Ok(())
}
