//! Luminance-dependent noise scaling.
//!
//! Shot noise grows as incident light falls, so darker pixels receive a
//! larger multiplier:
//! ```text
//!   scale(L) = clamp(1 + (1 − L/255)^1.5, 0.5, 2.0)
//! ```
//! `scale(0) = 2.0`, `scale(255) = 1.0`, non-increasing in between.

/// Rec. 709 luminance weights.
const LUMA_REC709: [f64; 3] = [0.2126, 0.7152, 0.0722];

const MIN_SCALE: f64 = 0.5;
const MAX_SCALE: f64 = 2.0;
const FALLOFF_EXPONENT: f64 = 1.5;

/// Perceptual luminance of an 8-bit RGB pixel, in `[0, 255]`.
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    LUMA_REC709[0] * f64::from(r) + LUMA_REC709[1] * f64::from(g) + LUMA_REC709[2] * f64::from(b)
}

/// Noise multiplier for a pixel of the given luminance.
pub fn luminance_scale(luminance: f64) -> f64 {
    (1.0 + (1.0 - luminance / 255.0).powf(FALLOFF_EXPONENT)).clamp(MIN_SCALE, MAX_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_black_gets_maximum_scale() {
        assert_eq!(luminance_scale(0.0), 2.0);
    }

    #[test]
    fn test_white_gets_unit_scale() {
        assert_eq!(luminance_scale(255.0), 1.0);
    }

    #[test]
    fn test_mid_gray_scale() {
        let expected = 1.0 + 0.5_f64.powf(1.5);
        assert!((luminance_scale(127.5) - expected).abs() < EPSILON);
    }

    #[test]
    fn test_scale_is_non_increasing() {
        let mut previous = luminance_scale(0.0);
        for step in 1..=1020 {
            let l = step as f64 * 0.25;
            let s = luminance_scale(l);
            assert!(s <= previous, "scale rose at L={l}: {s} > {previous}");
            previous = s;
        }
    }

    #[test]
    fn test_luminance_weights_sum_to_one() {
        assert!((luminance(255, 255, 255) - 255.0).abs() < EPSILON);
        assert_eq!(luminance(0, 0, 0), 0.0);
    }

    #[test]
    fn test_green_dominates_luminance() {
        assert!(luminance(0, 255, 0) > luminance(255, 0, 0));
        assert!(luminance(255, 0, 0) > luminance(0, 0, 255));
    }
}
