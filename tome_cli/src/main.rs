//! tome-patcher - Rename spell tomes after the school and tier of the spell they teach

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tome_core::{default_settings, LoadOrder, ModKey, PatchMod, Patcher, Settings};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Spell tome label patcher
#[derive(Parser)]
#[command(name = "tome-patcher")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Load order document (.toml or .json) listing plugins and their records
    #[arg(short, long)]
    load_order: PathBuf,

    /// Settings file (.json or .toml); built-in defaults when omitted
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Write the patch plugin as JSON to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// File name of the generated patch plugin
    #[arg(long, default_value = "SpellTomeLevels.esp")]
    patch_name: String,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let settings = match &cli.settings {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => {
            tracing::debug!("No settings file given, using defaults");
            default_settings()
        }
    };

    let load_order = LoadOrder::from_file(&cli.load_order)
        .with_context(|| format!("Failed to load load order from {}", cli.load_order.display()))?;
    tracing::debug!(plugins = load_order.len(), "Load order ready");

    let patch_key = ModKey::from_file_name(&cli.patch_name)
        .with_context(|| format!("Invalid patch plugin name {}", cli.patch_name))?;
    let mut patch = PatchMod::new(patch_key);

    let patcher = Patcher::new(&load_order, &settings);
    if patcher.companion_active() {
        tracing::info!("Better Spell Learning detected, reading spells from tome scripts");
    }
    let report = patcher.run(&mut patch)?;
    tracing::info!(
        renamed = report.renamed.len(),
        skipped = report.total_skipped(),
        errors = report.errors.len(),
        overrides = patch.len(),
        "Patch complete"
    );

    let json = serde_json::to_string_pretty(&patch.into_plugin())?;
    match &cli.output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("Failed to write patch to {}", path.display()))?,
        None => println!("{}", json),
    }

    Ok(())
}
