//! Grainy — command-line front end for the sensor noise pipeline.
//!
//! Decodes images, runs them through `grainy-core`, and encodes the results.

mod batch;
mod config;
mod image_io;

use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::Args;

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let library = args.preset_library()?;

    if args.list_presets {
        for preset in library.iter() {
            println!("{:<16} {}", preset.name, preset.description);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let config = args.noise_config(&library)?;
    if config.smoothing.is_some() {
        tracing::warn!("smoothing is accepted but has no effect");
    }

    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create output directory: {}", args.output_dir.display()))?;

    let inputs = batch::collect_inputs(&args.inputs)?;
    let settings = batch::OutputSettings {
        dir: args.output_dir.clone(),
        suffix: args.suffix.clone(),
        jpeg_quality: args.quality,
    };

    tracing::info!("Processing {} image(s)", inputs.len());
    let report = batch::run_batch(&inputs, &settings, &config, args.jobs.unwrap_or(0))?;

    tracing::info!(
        "Done: {} written, {} failed",
        report.written.len(),
        report.failed.len()
    );
    if report.failed.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
