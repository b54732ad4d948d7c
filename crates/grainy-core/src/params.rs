//! Noise configuration and named presets.
//!
//! `NoiseConfig` is the single source of truth for one processing run. It is
//! validated in full before any noise is generated; out-of-range values are
//! rejected, never clamped.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, PresetError};

/// Presets shipped with the crate, in the same shape as an external preset file.
const BUILTIN_PRESETS: &str = r#"{
    "subtle": {
        "name": "subtle",
        "description": "Barely visible grain for clean, modern captures",
        "settings": {
            "intensity": 0.015,
            "variance": 0.1,
            "luminanceDependent": true,
            "microContrast": 0.1
        }
    },
    "smartphone": {
        "name": "smartphone",
        "description": "Small-sensor noise with strong shadow grain",
        "settings": {
            "intensity": 0.03,
            "variance": 0.25,
            "luminanceDependent": true,
            "microContrast": 0.3
        }
    },
    "high-iso": {
        "name": "high-iso",
        "description": "Low-light capture at high sensor gain",
        "settings": {
            "intensity": 0.06,
            "variance": 0.4,
            "luminanceDependent": true,
            "microContrast": 0.2
        }
    },
    "flat": {
        "name": "flat",
        "description": "Uniform read noise, independent of brightness",
        "settings": {
            "intensity": 0.02,
            "variance": 0.0,
            "luminanceDependent": false,
            "microContrast": 0.0
        }
    }
}"#;

/// Parameters for one noise synthesis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoiseConfig {
    /// Standard deviation of the base noise, as a fraction of full scale. `[0, 1]`.
    pub intensity: f64,
    /// Spread of the per-pixel intensity multiplier. `[0, 1]`, 0 disables it.
    pub variance: f64,
    /// Scale noise up in shadows (shot-noise behavior).
    pub luminance_dependent: bool,
    /// Strength of the global contrast lift applied after compositing. `[0, 1]`.
    #[serde(default)]
    pub micro_contrast: f64,
    /// Fixed seed for reproducible output. `None` draws from OS entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    /// Accepted and range-checked, not consumed by any stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smoothing: Option<f64>,
}

impl Default for NoiseConfig {
    /// Produces an identity (no-op) configuration.
    fn default() -> Self {
        Self {
            intensity: 0.0,
            variance: 0.0,
            luminance_dependent: false,
            micro_contrast: 0.0,
            seed: None,
            smoothing: None,
        }
    }
}

impl NoiseConfig {
    /// Same settings with a different seed.
    pub fn with_seed(&self, seed: Option<u32>) -> Self {
        Self {
            seed: seed.map(i64::from),
            ..self.clone()
        }
    }

    /// Check every field against its declared range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit("intensity", self.intensity)?;
        check_unit("variance", self.variance)?;
        check_unit("microContrast", self.micro_contrast)?;
        if let Some(smoothing) = self.smoothing {
            check_unit("smoothing", smoothing)?;
        }
        self.seed_u32()?;
        Ok(())
    }

    /// The seed as PRNG state, or `None` when unseeded.
    pub fn seed_u32(&self) -> Result<Option<u32>, ConfigError> {
        self.seed
            .map(|seed| u32::try_from(seed).map_err(|_| ConfigError::InvalidSeed(seed)))
            .transpose()
    }
}

fn check_unit(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { field });
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::OutOfRange {
            field,
            value,
            min: 0.0,
            max: 1.0,
        });
    }
    Ok(())
}

/// A named, described configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub description: String,
    pub settings: NoiseConfig,
}

/// Presets keyed by name, iterated in name order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetLibrary {
    presets: BTreeMap<String, Preset>,
}

impl PresetLibrary {
    /// Parse a JSON object of `name -> { name, description, settings }`.
    ///
    /// Every preset is validated; the first invalid one fails the whole load.
    pub fn from_json(json: &str) -> Result<Self, PresetError> {
        let library: Self = serde_json::from_str(json)?;
        for (key, preset) in &library.presets {
            if *key != preset.name {
                return Err(PresetError::NameMismatch {
                    key: key.clone(),
                    name: preset.name.clone(),
                });
            }
            preset
                .settings
                .validate()
                .map_err(|source| PresetError::Invalid {
                    name: key.clone(),
                    source,
                })?;
        }
        tracing::debug!("loaded {} presets", library.presets.len());
        Ok(library)
    }

    /// The presets embedded in this crate.
    pub fn builtin() -> Result<Self, PresetError> {
        Self::from_json(BUILTIN_PRESETS)
    }

    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.values()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
