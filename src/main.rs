// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use course_catalog::utils::logging::{format_info, format_success};
use course_catalog::{Config, CourseStore, JsonExporter};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "course_catalog")]
#[command(version = "0.1.0")]
#[command(about = "Course catalog over heading-structured notes", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    /// Override the configured course data directory
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every course in the catalog
    List,

    /// Print the full record for one course as JSON
    Show {
        /// File stem, course id, or slug
        identifier: String,
    },

    /// Substring search across titles, descriptions, and topics
    Search {
        query: String,
    },

    /// Write every course as JSON plus a manifest
    Export {
        #[arg(short, long, default_value = "./exports")]
        output: PathBuf,

        #[arg(short, long)]
        pretty: bool,
    },

    /// Aggregate counts over the catalog
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    course_catalog::utils::logging::init_logger(cli.color, cli.verbose);

    let mut config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    if let Some(data_dir) = cli.data_dir {
        config.catalog.data_dir = data_dir;
    }

    let store = CourseStore::new(&config).context("Failed to open course store")?;

    match cli.command {
        Commands::List => cmd_list(&store).await?,
        Commands::Show { identifier } => cmd_show(&store, &identifier).await?,
        Commands::Search { query } => cmd_search(&store, &query).await?,
        Commands::Export { output, pretty } => cmd_export(&store, output, pretty).await?,
        Commands::Stats => cmd_stats(&store).await?,
    }

    Ok(())
}

async fn cmd_list(store: &CourseStore) -> Result<()> {
    let summaries = store.list().await?;
    info!("{} courses in catalog", summaries.len());

    for summary in &summaries {
        println!("{}", summary.format_line());
    }
    Ok(())
}

async fn cmd_show(store: &CourseStore, identifier: &str) -> Result<()> {
    let detail = store
        .get(identifier)
        .await
        .with_context(|| format!("Failed to resolve course '{identifier}'"))?;

    println!("{}", serde_json::to_string_pretty(&detail)?);
    Ok(())
}

async fn cmd_search(store: &CourseStore, query: &str) -> Result<()> {
    // an empty query is just the full listing
    let results = if query.trim().is_empty() {
        store.list().await?
    } else {
        store.search(query).await?
    };

    if results.is_empty() {
        println!("{}", format_info("no matching courses"));
        return Ok(());
    }

    for summary in &results {
        println!("{}", summary.format_line());
    }
    println!("{}", format_success(&format!("{} match(es)", results.len())));
    Ok(())
}

async fn cmd_export(store: &CourseStore, output: PathBuf, pretty: bool) -> Result<()> {
    let exporter = JsonExporter::new(output)?;
    let manifest = exporter.export_all(store, pretty).await?;

    println!(
        "{}",
        format_success(&format!(
            "exported {} course(s), skipped {}",
            manifest.total_courses, manifest.skipped
        ))
    );
    Ok(())
}

async fn cmd_stats(store: &CourseStore) -> Result<()> {
    let stats = store.stats().await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
