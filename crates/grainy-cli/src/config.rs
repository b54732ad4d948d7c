//! Command-line configuration for the `grainy` tool.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use grainy_core::{NoiseConfig, PresetLibrary};

/// Preset used when neither a preset nor an explicit intensity is given.
const DEFAULT_PRESET: &str = "subtle";

#[derive(Parser, Debug)]
#[command(author, version, about = "Add physically-motivated sensor noise to images")]
pub struct Args {
    #[arg(
        required_unless_present = "list_presets",
        help = "Images or directories of images to process"
    )]
    pub inputs: Vec<PathBuf>,

    #[arg(
        short = 'o',
        long,
        default_value = ".",
        help = "Directory for processed images"
    )]
    pub output_dir: PathBuf,

    #[arg(
        long,
        default_value = "_grain",
        help = "Appended to each input file stem to form the output name"
    )]
    pub suffix: String,

    #[arg(short = 'p', long, help = "Name of the preset to start from")]
    pub preset: Option<String>,

    #[arg(
        long,
        value_name = "FILE",
        help = "JSON preset library to use instead of the built-in presets"
    )]
    pub presets: Option<PathBuf>,

    #[arg(long, help = "Print the available presets and exit")]
    pub list_presets: bool,

    #[arg(long, help = "Base noise strength, 0.0 to 1.0")]
    pub intensity: Option<f64>,

    #[arg(long, help = "Per-pixel noise strength variation, 0.0 to 1.0")]
    pub variance: Option<f64>,

    #[arg(long, conflicts_with = "no_luminance_dependent", help = "Stronger noise in shadows")]
    pub luminance_dependent: bool,

    #[arg(long, help = "Same noise strength at every brightness")]
    pub no_luminance_dependent: bool,

    #[arg(long, help = "Global contrast lift after compositing, 0.0 to 1.0")]
    pub micro_contrast: Option<f64>,

    #[arg(long, help = "Master seed; each image derives its own seed from it")]
    pub seed: Option<i64>,

    #[arg(long, help = "Accepted for preset compatibility, currently unused")]
    pub smoothing: Option<f64>,

    #[arg(
        long,
        value_parser = clap::value_parser!(u8).range(1..=100),
        help = "JPEG encoder quality, 1 to 100"
    )]
    pub quality: Option<u8>,

    #[arg(
        short = 'j',
        long,
        help = "Worker threads for batch processing (default: one per core)"
    )]
    pub jobs: Option<usize>,
}

impl Args {
    /// The preset library selected on the command line.
    pub fn preset_library(&self) -> Result<PresetLibrary> {
        match &self.presets {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read preset file: {}", path.display()))?;
                PresetLibrary::from_json(&json)
                    .with_context(|| format!("Invalid preset file: {}", path.display()))
            }
            None => Ok(PresetLibrary::builtin()?),
        }
    }

    /// Resolve the preset and overrides into a validated configuration.
    pub fn noise_config(&self, library: &PresetLibrary) -> Result<NoiseConfig> {
        let mut config = match (&self.preset, self.intensity) {
            (Some(name), _) => library
                .get(name)
                .map(|preset| preset.settings.clone())
                .ok_or_else(|| anyhow!("Unknown preset '{name}'"))?,
            (None, Some(_)) => NoiseConfig::default(),
            (None, None) => library
                .get(DEFAULT_PRESET)
                .map(|preset| preset.settings.clone())
                .unwrap_or_default(),
        };

        if let Some(intensity) = self.intensity {
            config.intensity = intensity;
        }
        if let Some(variance) = self.variance {
            config.variance = variance;
        }
        if self.luminance_dependent {
            config.luminance_dependent = true;
        }
        if self.no_luminance_dependent {
            config.luminance_dependent = false;
        }
        if let Some(micro_contrast) = self.micro_contrast {
            config.micro_contrast = micro_contrast;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.smoothing.is_some() {
            config.smoothing = self.smoothing;
        }

        config.validate().context("Invalid noise settings")?;
        Ok(config)
    }
}
