//! Per-image noise fields.
//!
//! Four dense `f32` fields are built for every image, one value per pixel in
//! scan order:
//!
//! ```text
//!   base[i]    = N(0, intensity) × (1 + N(0, variance))     (variance > 0)
//!              = N(0, intensity)                            (variance = 0)
//!   channel[i] = N(0, intensity × multiplier × 0.3)
//! ```
//!
//! The base field and the three channel fields come from two separate
//! streams (`seed` and `seed + 1`), so channel grain is never a scaled copy
//! of the base pattern. Channel fields are filled red, then green, then blue,
//! each over the full image before the next starts.

use crate::error::{ConfigError, DimensionError};
use crate::params::NoiseConfig;
use crate::random::SeededRandom;

/// Relative channel noise, modeled on Bayer quantum efficiency `[R, G, B]`.
/// Green has twice the photosites and is cleanest; blue is noisiest.
pub const CHANNEL_MULTIPLIERS: [f64; 3] = [1.0, 0.85, 1.25];

/// Channel noise standard deviation relative to the base intensity.
pub const CHANNEL_SCALE: f64 = 0.3;

/// One noise value per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseField {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl NoiseField {
    /// Wrap precomputed values. The length must be `width × height`.
    pub fn from_values(width: u32, height: u32, values: Vec<f32>) -> Result<Self, DimensionError> {
        let expected = width as usize * height as usize;
        if values.len() != expected {
            return Err(DimensionError::FieldLength {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// A field of `width × height` copies of `value`.
    pub fn filled(width: u32, height: u32, value: f32) -> Self {
        Self {
            width,
            height,
            values: vec![value; width as usize * height as usize],
        }
    }

    fn sample(width: u32, height: u32, mut draw: impl FnMut() -> f64) -> Self {
        let count = width as usize * height as usize;
        let values = (0..count).map(|_| draw() as f32).collect();
        Self {
            width,
            height,
            values,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}

/// The base field plus one field per color channel.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseFields {
    pub base: NoiseField,
    pub red: NoiseField,
    pub green: NoiseField,
    pub blue: NoiseField,
}

impl NoiseFields {
    /// Pixel count shared by all four fields.
    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }
}

/// Builds the four noise fields for one image from a validated config.
#[derive(Debug, Clone)]
pub struct NoiseFieldGenerator {
    intensity: f64,
    variance: f64,
    seed: Option<u32>,
}

impl NoiseFieldGenerator {
    /// Validates `config` and captures the parameters the fields depend on.
    pub fn new(config: &NoiseConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            intensity: config.intensity,
            variance: config.variance,
            seed: config.seed_u32()?,
        })
    }

    /// Generate fresh fields for a `width × height` image.
    ///
    /// With a seed, the output depends only on
    /// `(seed, intensity, variance, width, height)`.
    pub fn generate(&self, width: u32, height: u32) -> Result<NoiseFields, DimensionError> {
        if width == 0 || height == 0 {
            return Err(DimensionError::ZeroSize { width, height });
        }

        let base = self.generate_base(width, height);

        let mut channel_rng = match self.seed {
            Some(seed) => SeededRandom::new(Some(seed.wrapping_add(1))),
            None => SeededRandom::from_entropy(),
        };
        let mut sample_channel = |multiplier: f64| {
            let std_dev = self.intensity * multiplier * CHANNEL_SCALE;
            NoiseField::sample(width, height, || channel_rng.gaussian(0.0, std_dev))
        };
        let red = sample_channel(CHANNEL_MULTIPLIERS[0]);
        let green = sample_channel(CHANNEL_MULTIPLIERS[1]);
        let blue = sample_channel(CHANNEL_MULTIPLIERS[2]);

        Ok(NoiseFields {
            base,
            red,
            green,
            blue,
        })
    }

    fn generate_base(&self, width: u32, height: u32) -> NoiseField {
        let mut rng = SeededRandom::new(self.seed);
        let (intensity, variance) = (self.intensity, self.variance);
        NoiseField::sample(width, height, || {
            let base_noise = rng.gaussian(0.0, intensity);
            // No draw is consumed when variance is off.
            let variance_multiplier = if variance > 0.0 {
                1.0 + rng.gaussian(0.0, variance)
            } else {
                1.0
            };
            base_noise * variance_multiplier
        })
    }
}
