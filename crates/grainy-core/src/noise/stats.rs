//! Summary statistics over a noise field.

use crate::noise::field::NoiseField;

/// Mean, spread and range of the finite samples of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStats {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// Samples excluded because they were infinite or NaN.
    pub non_finite: usize,
}

impl FieldStats {
    /// Compute statistics in f64, skipping non-finite samples.
    pub fn of(field: &NoiseField) -> Self {
        let mut count = 0usize;
        let mut non_finite = 0usize;
        let mut sum = 0.0_f64;
        let mut sum_sq = 0.0_f64;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for &v in field.as_slice() {
            if !v.is_finite() {
                non_finite += 1;
                continue;
            }
            let v = f64::from(v);
            count += 1;
            sum += v;
            sum_sq += v * v;
            min = min.min(v);
            max = max.max(v);
        }

        if count == 0 {
            return Self {
                mean: 0.0,
                std_dev: 0.0,
                min: 0.0,
                max: 0.0,
                non_finite,
            };
        }

        let n = count as f64;
        let mean = sum / n;
        let variance = (sum_sq / n) - (mean * mean);
        Self {
            mean,
            std_dev: variance.max(0.0).sqrt(),
            min,
            max,
            non_finite,
        }
    }
}
