use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use curator_allocate::{allocate, AllocationConfig, AllocationReport};
use curator_catalog::{
    filter_pool, ingest_assets, ingest_items, load_asset_manifest, load_item_manifest,
    scan_directory, Asset, IngestStats, ScanConfig,
};
use curator_matcher::{rank, ScoreWeights};

#[derive(Parser)]
#[command(name = "curator")]
#[command(about = "Assigns pool imagery to content items by lexical relevance", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an asset manifest from a directory of images
    Scan {
        /// Directory to walk
        dir: PathBuf,

        /// Write the manifest here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not record parent directory names as groups
        #[arg(long)]
        no_groups: bool,
    },

    /// Preview the ranked candidate list for one item
    Rank {
        /// Asset manifest (JSON array of assets)
        #[arg(long)]
        assets: PathBuf,

        /// Item manifest (JSON array of items)
        #[arg(long)]
        items: PathBuf,

        /// Item to preview
        #[arg(long)]
        item_id: String,

        /// Show at most this many candidates
        #[arg(long, default_value_t = 20)]
        limit: usize,

        /// JSON run profile overriding weights/thresholds
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Group to exclude from the pool (repeatable)
        #[arg(long = "exclude-group")]
        exclude_groups: Vec<String>,
    },

    /// Allocate assets to every item and write the result document
    Assign {
        /// Asset manifest (JSON array of assets)
        #[arg(long)]
        assets: PathBuf,

        /// Item manifest (JSON array of items)
        #[arg(long)]
        items: PathBuf,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON run profile overriding weights/thresholds
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Group to exclude from the pool (repeatable)
        #[arg(long = "exclude-group")]
        exclude_groups: Vec<String>,
    },
}

/// Optional JSON overrides for scoring weights and allocation parameters;
/// any field left out keeps its canonical default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RunProfile {
    weights: ScoreWeights,
    allocation: AllocationConfig,
}

/// The document `assign` hands to the result consumer.
#[derive(Debug, Serialize)]
struct OutputDocument {
    assignments: BTreeMap<String, Vec<String>>,
    report: AllocationReport,
    rejected_assets: IngestStats,
    rejected_items: IngestStats,
}

/// One row of the `rank` preview.
#[derive(Debug, Serialize)]
struct RankedRow {
    identifier: String,
    locator: String,
    score: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Scan {
            dir,
            output,
            no_groups,
        } => cmd_scan(&dir, output.as_deref(), no_groups),
        Commands::Rank {
            assets,
            items,
            item_id,
            limit,
            profile,
            exclude_groups,
        } => cmd_rank(
            &assets,
            &items,
            &item_id,
            limit,
            profile.as_deref(),
            &exclude_groups,
        ),
        Commands::Assign {
            assets,
            items,
            output,
            profile,
            exclude_groups,
        } => cmd_assign(
            &assets,
            &items,
            output.as_deref(),
            profile.as_deref(),
            &exclude_groups,
        ),
    }
}

fn init_logger(verbose: bool, quiet: bool) {
    let default_filter = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    builder.target(env_logger::Target::Stderr).init();
}

fn cmd_scan(dir: &Path, output: Option<&Path>, no_groups: bool) -> Result<()> {
    let config = ScanConfig {
        group_from_parent: !no_groups,
        ..Default::default()
    };
    let assets = scan_directory(dir, &config)
        .with_context(|| format!("Failed to scan {}", dir.display()))?;
    write_json(&assets, output)
}

fn cmd_rank(
    assets_path: &Path,
    items_path: &Path,
    item_id: &str,
    limit: usize,
    profile_path: Option<&Path>,
    exclude_groups: &[String],
) -> Result<()> {
    let profile = load_profile(profile_path)?;
    let pool = load_pool(assets_path, exclude_groups)?.0;

    let (items, _) = ingest_items(load_item_manifest(items_path)?);
    let Some(item) = items.iter().find(|item| item.item_id == item_id) else {
        bail!("Item '{item_id}' not found in {}", items_path.display());
    };

    let rows: Vec<RankedRow> = rank(&pool, &item.profile, &profile.weights)
        .into_iter()
        .take(limit)
        .map(|ranked| RankedRow {
            identifier: ranked.asset.identifier.clone(),
            locator: ranked.asset.locator.clone(),
            score: ranked.score,
        })
        .collect();

    write_json(&rows, None)
}

fn cmd_assign(
    assets_path: &Path,
    items_path: &Path,
    output: Option<&Path>,
    profile_path: Option<&Path>,
    exclude_groups: &[String],
) -> Result<()> {
    let profile = load_profile(profile_path)?;
    let (pool, asset_stats) = load_pool(assets_path, exclude_groups)?;
    let (items, item_stats) = ingest_items(load_item_manifest(items_path)?);

    let outcome = allocate(&items, &pool, &profile.weights, &profile.allocation)?;

    let document = OutputDocument {
        assignments: outcome.assignments,
        report: outcome.report,
        rejected_assets: asset_stats,
        rejected_items: item_stats,
    };
    write_json(&document, output)
}

/// Load, validate, and eligibility-filter the asset pool.
fn load_pool(path: &Path, exclude_groups: &[String]) -> Result<(Vec<Asset>, IngestStats)> {
    let (pool, stats) = ingest_assets(load_asset_manifest(path)?);
    let excluded: HashSet<String> = exclude_groups.iter().cloned().collect();
    Ok((filter_pool(pool, &excluded), stats))
}

fn load_profile(path: Option<&Path>) -> Result<RunProfile> {
    let Some(path) = path else {
        log::debug!("No run profile given; using canonical defaults");
        return Ok(RunProfile::default());
    };
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("Malformed run profile {}", path.display()))
}

fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let mut rendered = serde_json::to_string_pretty(value)?;
    rendered.push('\n');
    match output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            print!("{rendered}");
            Ok(())
        }
    }
}
