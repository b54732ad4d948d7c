//! Batch processing of image files.
//!
//! Images are independent units of work: each one is decoded, noised with
//! its own pair of streams and encoded before its buffers are dropped. With
//! a master seed, image `i` uses `image_seed(master, i)`, so results do not
//! depend on which worker picks an image up.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use grainy_core::{NoiseConfig, image_seed, process};
use image::ImageFormat;
use rayon::prelude::*;

use crate::image_io::{load_image, save_image};

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Output paths written, in input order.
    pub written: Vec<PathBuf>,
    /// Inputs that failed, with the error chain rendered as text.
    pub failed: Vec<(PathBuf, String)>,
}

/// Where and how processed images are written.
#[derive(Debug, Clone)]
pub struct OutputSettings {
    pub dir: PathBuf,
    /// Appended to each input stem.
    pub suffix: String,
    /// Encoder quality for JPEG outputs; `None` keeps the encoder default.
    pub jpeg_quality: Option<u8>,
}

/// Expand directory arguments into the images they contain.
///
/// Directories are scanned one level deep and keep files whose extension
/// names a known image format, sorted by path so seed indices are stable
/// between runs. Other arguments pass through unchanged.
pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::with_capacity(paths.len());
    for path in paths {
        if !path.is_dir() {
            inputs.push(path.clone());
            continue;
        }

        let mut found = Vec::new();
        let entries = fs::read_dir(path).with_context(|| format!("Failed to read directory {}", path.display()))?;
        for entry in entries {
            let entry_path = entry
                .with_context(|| format!("Failed to read directory {}", path.display()))?
                .path();
            if entry_path.is_file() && ImageFormat::from_path(&entry_path).is_ok() {
                found.push(entry_path);
            }
        }
        found.sort();
        tracing::debug!("{}: {} image(s)", path.display(), found.len());
        inputs.extend(found);
    }
    Ok(inputs)
}

/// Output path for `input`: `<output_dir>/<stem><suffix>.<ext>`.
pub fn output_path(input: &Path, output_dir: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let name = match input.extension() {
        Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{suffix}.png"),
    };
    output_dir.join(name)
}

/// Process every input on a pool of `jobs` threads (0 = one per core).
pub fn run_batch(
    inputs: &[PathBuf],
    settings: &OutputSettings,
    config: &NoiseConfig,
    jobs: usize,
) -> Result<BatchReport> {
    let master_seed = config.seed_u32()?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .context("Failed to build worker pool")?;

    let results: Vec<(PathBuf, Result<PathBuf>)> = pool.install(|| {
        inputs
            .par_iter()
            .enumerate()
            .map(|(index, input)| {
                let image_config = config.with_seed(master_seed.map(|m| image_seed(m, index)));
                let output = output_path(input, &settings.dir, &settings.suffix);
                let result =
                    process_file(input, &output, &image_config, settings.jpeg_quality).map(|()| output);
                (input.clone(), result)
            })
            .collect()
    });

    let mut report = BatchReport::default();
    for (input, result) in results {
        match result {
            Ok(output) => {
                tracing::info!("{} -> {}", input.display(), output.display());
                report.written.push(output);
            }
            Err(e) => {
                tracing::warn!("{}: {e:#}", input.display());
                report.failed.push((input, format!("{e:#}")));
            }
        }
    }
    Ok(report)
}

fn process_file(input: &Path, output: &Path, config: &NoiseConfig, jpeg_quality: Option<u8>) -> Result<()> {
    let buffer = load_image(input).with_context(|| format!("Failed to load {}", input.display()))?;
    let noisy = process(&buffer, config)?;
    save_image(output, &noisy, jpeg_quality).with_context(|| format!("Failed to save {}", output.display()))?;
    Ok(())
}
