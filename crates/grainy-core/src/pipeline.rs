//! Single-image entry point: validate, generate, composite, correct.

use crate::composite::{apply_micro_contrast, apply_noise};
use crate::error::Result;
use crate::image::PixelBuffer;
use crate::noise::field::NoiseFieldGenerator;
use crate::noise::stats::FieldStats;
use crate::params::NoiseConfig;

/// Add synthetic sensor noise to `input`.
///
/// The configuration is validated in full before any work starts. The input
/// buffer is left untouched; the result is a fresh buffer of the same shape.
/// Noise fields live only for the duration of this call.
pub fn process(input: &PixelBuffer, config: &NoiseConfig) -> Result<PixelBuffer> {
    let generator = NoiseFieldGenerator::new(config)?;
    let (width, height) = (input.width(), input.height());

    let fields = generator.generate(width, height)?;
    if tracing::enabled!(tracing::Level::DEBUG) {
        let base = FieldStats::of(&fields.base);
        tracing::debug!(
            "base noise {width}x{height}: mean={:.5} std={:.5} non_finite={}",
            base.mean,
            base.std_dev,
            base.non_finite
        );
        for (name, field) in [("red", &fields.red), ("green", &fields.green), ("blue", &fields.blue)] {
            let stats = FieldStats::of(field);
            tracing::debug!("{name} noise: std={:.5}", stats.std_dev);
        }
    }

    let mut output = apply_noise(input, &fields, config.luminance_dependent);
    apply_micro_contrast(&mut output, config.micro_contrast);

    tracing::info!(
        "applied noise to {width}x{height} image (intensity={}, variance={}, seed={:?})",
        config.intensity,
        config.variance,
        config.seed
    );
    Ok(output)
}

/// Seed for the image at `index` in a batch driven by `master`.
///
/// Each image consumes two consecutive seeds (base and channel stream), so
/// seeds are spaced by two to keep neighbouring images' streams disjoint.
pub fn image_seed(master: u32, index: usize) -> u32 {
    master.wrapping_add((index as u32).wrapping_mul(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, GrainError};

    fn seeded(intensity: f64, variance: f64, luminance_dependent: bool, seed: i64) -> NoiseConfig {
        NoiseConfig {
            intensity,
            variance,
            luminance_dependent,
            seed: Some(seed),
            ..NoiseConfig::default()
        }
    }

    #[test]
    fn test_zero_noise_single_pixel_is_identity() {
        let input = PixelBuffer::from_rgb(1, 1, vec![250, 250, 250]).unwrap();
        let output = process(&input, &seeded(0.0, 0.0, true, 99)).unwrap();
        assert_eq!(output.as_bytes(), &[250, 250, 250]);
    }

    #[test]
    fn test_invalid_config_reports_field() {
        let input = PixelBuffer::from_rgb(1, 1, vec![0, 0, 0]).unwrap();
        let err = process(&input, &seeded(0.1, 1.5, false, 1)).unwrap_err();
        assert!(matches!(
            err,
            GrainError::Config(ConfigError::OutOfRange { field: "variance", .. })
        ));
        assert!(err.to_string().contains("variance"));
    }

    #[test]
    fn test_same_seed_same_output() {
        let data: Vec<u8> = (0..48).map(|v| (v * 5) as u8).collect();
        let input = PixelBuffer::from_rgb(4, 4, data).unwrap();
        let config = seeded(0.04, 0.3, true, 31337);
        assert_eq!(process(&input, &config).unwrap(), process(&input, &config).unwrap());
    }

    #[test]
    fn test_image_seed_spacing() {
        assert_eq!(image_seed(10, 0), 10);
        assert_eq!(image_seed(10, 3), 16);
        assert_eq!(image_seed(u32::MAX, 1), 1);
    }
}
