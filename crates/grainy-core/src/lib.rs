//! Grainy Core — domain layer for synthetic sensor noise.
//!
//! This crate contains the seeded random source, noise-field synthesis,
//! luminance-dependent scaling and the compositing pass. No file I/O and
//! no threads; every operation is a deterministic transform of its inputs.

pub mod composite;
pub mod error;
pub mod image;
pub mod noise;
pub mod params;
pub mod pipeline;
pub mod random;

// Re-exports for convenience.
pub use error::{ConfigError, DimensionError, GrainError, PresetError};
pub use image::PixelBuffer;
pub use noise::field::{NoiseField, NoiseFieldGenerator, NoiseFields};
pub use params::{NoiseConfig, Preset, PresetLibrary};
pub use pipeline::{image_seed, process};
pub use random::SeededRandom;
