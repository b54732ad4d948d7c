//! Per-pixel noise compositing.
//!
//! For each pixel `i` with input `(r, g, b)`:
//! ```text
//!   L     = 0.2126 r + 0.7152 g + 0.0722 b
//!   n     = base[i] × scale(L)          (scale = 1 when not luminance dependent)
//!   out_c = clamp(round(in_c + (n + channel_c[i]) × 255), 0, 255)
//! ```
//!
//! Every pixel reads only its own noise samples, so the pass has no
//! cross-pixel dependencies.

use crate::composite::to_byte;
use crate::image::PixelBuffer;
use crate::noise::field::NoiseFields;
use crate::noise::luminance::{luminance, luminance_scale};

/// Composite `fields` onto `input`, returning a new buffer of the same shape.
///
/// # Panics
/// If any field's width and height differ from `input`'s. Fields
/// are always generated for the image they are applied to, so a mismatch is
/// a programming error.
pub fn apply_noise(input: &PixelBuffer, fields: &NoiseFields, luminance_dependent: bool) -> PixelBuffer {
    let shape = (input.width(), input.height());
    for field in [&fields.base, &fields.red, &fields.green, &fields.blue] {
        assert_eq!(
            (field.width(), field.height()),
            shape,
            "noise field shape does not match the {}x{} image",
            shape.0,
            shape.1
        );
    }

    let base = fields.base.as_slice();
    let channels = [
        fields.red.as_slice(),
        fields.green.as_slice(),
        fields.blue.as_slice(),
    ];

    let mut output = input.zeroed_like();
    let stride = input.channels() as usize;
    let src = input.as_bytes().chunks_exact(stride);
    let dst = output.as_bytes_mut().chunks_exact_mut(stride);

    for (i, (px_in, px_out)) in src.zip(dst).enumerate() {
        let mut base_noise = f64::from(base[i]);
        if luminance_dependent {
            base_noise *= luminance_scale(luminance(px_in[0], px_in[1], px_in[2]));
        }

        for c in 0..3 {
            let contribution = (base_noise + f64::from(channels[c][i])) * 255.0;
            px_out[c] = to_byte(f64::from(px_in[c]) + contribution);
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::field::NoiseField;

    fn uniform_fields(width: u32, height: u32, base: f32, channel: [f32; 3]) -> NoiseFields {
        NoiseFields {
            base: NoiseField::filled(width, height, base),
            red: NoiseField::filled(width, height, channel[0]),
            green: NoiseField::filled(width, height, channel[1]),
            blue: NoiseField::filled(width, height, channel[2]),
        }
    }

    #[test]
    fn test_silent_fields_are_identity() {
        let input = PixelBuffer::from_rgb(2, 1, vec![250, 250, 250, 3, 130, 77]).unwrap();
        let output = apply_noise(&input, &uniform_fields(2, 1, 0.0, [0.0; 3]), true);
        assert_eq!(output, input);
    }

    #[test]
    fn test_positive_noise_clamps_at_white() {
        let input = PixelBuffer::from_rgb(1, 1, vec![250, 250, 250]).unwrap();
        let fields = uniform_fields(1, 1, 20.0 / 255.0, [0.0; 3]);
        let output = apply_noise(&input, &fields, false);
        assert_eq!(output.as_bytes(), &[255, 255, 255]);
    }

    #[test]
    fn test_negative_noise_clamps_at_black() {
        let input = PixelBuffer::from_rgb(1, 1, vec![5, 10, 15]).unwrap();
        let fields = uniform_fields(1, 1, -0.5, [0.0; 3]);
        let output = apply_noise(&input, &fields, false);
        assert_eq!(output.as_bytes(), &[0, 0, 0]);
    }

    #[test]
    fn test_channel_noise_is_added_per_channel() {
        let input = PixelBuffer::from_rgb(1, 1, vec![100, 100, 100]).unwrap();
        let fields = uniform_fields(1, 1, 0.0, [10.0 / 255.0, -10.0 / 255.0, 0.0]);
        let output = apply_noise(&input, &fields, false);
        assert_eq!(output.as_bytes(), &[110, 90, 100]);
    }

    #[test]
    fn test_luminance_scaling_doubles_noise_in_black() {
        let input = PixelBuffer::from_rgb(1, 1, vec![0, 0, 0]).unwrap();
        let fields = uniform_fields(1, 1, 10.0 / 255.0, [0.0; 3]);
        assert_eq!(apply_noise(&input, &fields, false).as_bytes(), &[10, 10, 10]);
        assert_eq!(apply_noise(&input, &fields, true).as_bytes(), &[20, 20, 20]);
    }

    #[test]
    fn test_luminance_scaling_is_neutral_in_white() {
        let input = PixelBuffer::from_rgb(1, 1, vec![255, 255, 255]).unwrap();
        let fields = uniform_fields(1, 1, -10.0 / 255.0, [0.0; 3]);
        assert_eq!(apply_noise(&input, &fields, true).as_bytes(), &[245, 245, 245]);
    }

    #[test]
    fn test_channel_noise_is_not_luminance_scaled() {
        let input = PixelBuffer::from_rgb(1, 1, vec![0, 0, 0]).unwrap();
        let fields = uniform_fields(1, 1, 0.0, [10.0 / 255.0; 3]);
        assert_eq!(apply_noise(&input, &fields, true).as_bytes(), &[10, 10, 10]);
    }

    #[test]
    fn test_non_finite_noise_is_clamped() {
        let input = PixelBuffer::from_rgb(3, 1, vec![100; 9]).unwrap();
        let fields = NoiseFields {
            base: NoiseField::from_values(3, 1, vec![f32::INFINITY, f32::NEG_INFINITY, f32::NAN]).unwrap(),
            red: NoiseField::filled(3, 1, 0.0),
            green: NoiseField::filled(3, 1, 0.0),
            blue: NoiseField::filled(3, 1, 0.0),
        };
        let output = apply_noise(&input, &fields, false);
        assert_eq!(output.as_bytes(), &[255, 255, 255, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_input_is_not_modified() {
        let input = PixelBuffer::from_rgb(1, 1, vec![40, 50, 60]).unwrap();
        let snapshot = input.clone();
        let _ = apply_noise(&input, &uniform_fields(1, 1, 0.1, [0.0; 3]), false);
        assert_eq!(input, snapshot);
    }

    #[test]
    #[should_panic(expected = "noise field shape")]
    fn test_mismatched_fields_panic() {
        let input = PixelBuffer::from_rgb(2, 2, vec![0; 12]).unwrap();
        let _ = apply_noise(&input, &uniform_fields(1, 1, 0.0, [0.0; 3]), false);
    }

    #[test]
    #[should_panic(expected = "noise field shape")]
    fn test_transposed_fields_panic() {
        let input = PixelBuffer::from_rgb(3, 2, vec![0; 18]).unwrap();
        let _ = apply_noise(&input, &uniform_fields(2, 3, 0.0, [0.0; 3]), false);
    }
}
