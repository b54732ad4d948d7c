//! Global micro-contrast correction.
//!
//! A content-independent linear stretch around mid-gray (128):
//! ```text
//!   multiplier = 1 + micro_contrast × 0.1
//!   offset     = −128 × (multiplier − 1)
//!   out        = clamp(round(in × multiplier + offset), 0, 255)
//! ```

use crate::composite::to_byte;
use crate::image::PixelBuffer;

const MAX_STRETCH: f64 = 0.1;
const PIVOT: f64 = 128.0;

/// Apply the contrast stretch to every channel of every pixel in place.
///
/// `micro_contrast = 0.0` leaves the buffer untouched.
pub fn apply_micro_contrast(buffer: &mut PixelBuffer, micro_contrast: f64) {
    if micro_contrast <= 0.0 {
        return;
    }

    let multiplier = 1.0 + micro_contrast * MAX_STRETCH;
    let offset = -PIVOT * (multiplier - 1.0);
    for value in buffer.as_bytes_mut() {
        *value = to_byte(f64::from(*value) * multiplier + offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_ramp() -> PixelBuffer {
        let data: Vec<u8> = (0..=255).flat_map(|v| [v, v, v]).collect();
        PixelBuffer::from_rgb(256, 1, data).unwrap()
    }

    #[test]
    fn test_zero_is_identity() {
        let original = gray_ramp();
        let mut buffer = original.clone();
        apply_micro_contrast(&mut buffer, 0.0);
        assert_eq!(buffer, original);
    }

    #[test]
    fn test_pivot_is_fixed() {
        let mut buffer = PixelBuffer::from_rgb(1, 1, vec![128, 128, 128]).unwrap();
        apply_micro_contrast(&mut buffer, 1.0);
        assert_eq!(buffer.as_bytes(), &[128, 128, 128]);
    }

    #[test]
    fn test_stretch_moves_values_away_from_pivot() {
        let mut buffer = PixelBuffer::from_rgb(2, 1, vec![200, 50, 0, 255, 128, 100]).unwrap();
        apply_micro_contrast(&mut buffer, 0.5);
        // 200 → 203.6, 50 → 46.1, 0 → −6.4, 255 → 261.35, 100 → 98.6
        assert_eq!(buffer.as_bytes(), &[204, 46, 0, 255, 128, 99]);
    }

    #[test]
    fn test_small_strengths_round_exact_halves_up() {
        // At 0.1, 78 lands exactly on 77.5 and 178 on 178.5.
        let mut buffer = gray_ramp();
        apply_micro_contrast(&mut buffer, 0.1);
        assert_eq!(buffer.pixel(78), [78, 78, 78]);
        assert_eq!(buffer.pixel(178), [179, 179, 179]);
        assert_eq!(buffer.pixel(0), [0, 0, 0]);
        assert_eq!(buffer.pixel(255), [255, 255, 255]);

        let mut buffer = gray_ramp();
        apply_micro_contrast(&mut buffer, 0.3);
        assert_eq!(buffer.pixel(78), [77, 77, 77]);

        let mut buffer = gray_ramp();
        apply_micro_contrast(&mut buffer, 0.7);
        assert_eq!(buffer.pixel(178), [182, 182, 182]);
    }

    #[test]
    fn test_output_is_monotonic() {
        let mut buffer = gray_ramp();
        apply_micro_contrast(&mut buffer, 1.0);
        let reds: Vec<u8> = buffer.as_bytes().iter().step_by(3).copied().collect();
        assert!(reds.windows(2).all(|w| w[0] <= w[1]));
    }
}
