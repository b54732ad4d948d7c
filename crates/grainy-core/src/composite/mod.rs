//! Compositing — sums noise into the pixel buffer, then applies the global
//! micro-contrast correction.

pub mod contrast;
pub mod grain;

pub use contrast::apply_micro_contrast;
pub use grain::apply_noise;

/// Round half up and clamp into a byte.
///
/// A NaN intermediate survives the clamp and lands on 0 through the
/// saturating cast; infinities clamp to the nearest bound.
pub(crate) fn to_byte(value: f64) -> u8 {
    (value + 0.5).floor().clamp(0.0, 255.0) as u8
}
