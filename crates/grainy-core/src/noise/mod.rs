//! Noise synthesis — seeded fields, luminance scaling, and field statistics.

pub mod field;
pub mod luminance;
pub mod stats;

pub use field::{NoiseField, NoiseFieldGenerator, NoiseFields};
pub use luminance::{luminance, luminance_scale};
pub use stats::FieldStats;
