//! st-dts - generate `.d.ts` declarations and source maps from resolved
//! stylesheet metadata

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stylable_dts::{
    DtsOptions, DuplicatePolicy, MapDelivery, generate_with_source_map, read_metadata_json,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MapMode {
    /// Write no source map
    None,
    /// Write `<out>.map` and reference it from the declaration file
    Sibling,
    /// Embed the map in the declaration file as a data URL
    Inline,
}

#[derive(Debug, Parser)]
#[command(name = "st-dts")]
#[command(version)]
#[command(about = "Generate typed declarations for a compiled stylesheet", long_about = None)]
struct Cli {
    /// Resolved stylesheet metadata (JSON)
    metadata: PathBuf,

    /// Path of the original stylesheet, recorded in the source map
    #[arg(short, long)]
    source: String,

    /// Declaration file to write (defaults to `<source>.d.ts`)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// How the source map is delivered
    #[arg(long, value_enum, default_value = "sibling")]
    map: MapMode,

    /// Let the last declaration of a repeated symbol supply its position
    #[arg(long)]
    last_wins: bool,
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("Output path has no file name: {}", path.display()))
}

fn run(cli: Cli) -> Result<()> {
    let out = cli
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}.d.ts", cli.source)));
    let map_path = PathBuf::from(format!("{}.map", out.display()));

    let map_delivery = match cli.map {
        MapMode::None => MapDelivery::None,
        MapMode::Sibling => MapDelivery::Sibling {
            file: file_name(&map_path)?,
        },
        MapMode::Inline => MapDelivery::Inline,
    };
    let duplicates = if cli.last_wins {
        DuplicatePolicy::LastWins
    } else {
        DuplicatePolicy::FirstWins
    };
    let options = DtsOptions::new(cli.source.clone())
        .with_duplicates(duplicates)
        .with_map_delivery(map_delivery);

    let json = fs::read_to_string(&cli.metadata)
        .with_context(|| format!("Failed to read metadata: {}", cli.metadata.display()))?;
    let metadata = read_metadata_json(&json, options.duplicates)
        .with_context(|| format!("Failed to read metadata: {}", cli.metadata.display()))?;
    let output = generate_with_source_map(&metadata, &options)?;

    fs::write(&out, output.declaration_with_map_reference()?)
        .with_context(|| format!("Failed to write {}", out.display()))?;
    info!(path = %out.display(), "Wrote declarations");

    if cli.map == MapMode::Sibling {
        fs::write(&map_path, output.source_map_json()?)
            .with_context(|| format!("Failed to write {}", map_path.display()))?;
        info!(path = %map_path.display(), "Wrote source map");
    }

    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "st_dts=info,stylable_dts=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    run(Cli::parse())
}
