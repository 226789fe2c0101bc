//! Confidence band around a point forecast.
//!
//! Half-width at horizon `h` is `z * base * sqrt(h)`: variance grows linearly
//! with horizon under a fixed-z Gaussian band.

use crate::domain::ModelParams;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UncertaintyBand {
    pub base: f64,
    pub z_score: f64,
}

impl UncertaintyBand {
    pub fn new(params: &ModelParams) -> Self {
        Self {
            base: params.uncertainty_base,
            z_score: params.z_score,
        }
    }

    /// Standard-error proxy at `horizon` (before the z multiplier).
    pub fn uncertainty(&self, horizon: u32) -> f64 {
        self.base * f64::from(horizon).sqrt()
    }

    pub fn half_width(&self, horizon: u32) -> f64 {
        self.z_score * self.uncertainty(horizon)
    }

    /// `(lower, upper)` bounds for `value` at `horizon`.
    pub fn bounds(&self, value: f64, horizon: u32) -> (f64, f64) {
        let hw = self.half_width(horizon);
        (value - hw, value + hw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_width_grows_with_sqrt_horizon() {
        let band = UncertaintyBand::new(&ModelParams::default());
        let mut prev = 0.0;
        for h in 1..=6u32 {
            let (lo, hi) = band.bounds(10.0, h);
            let width = hi - lo;
            let expected = 2.0 * 1.96 * 0.3 * f64::from(h).sqrt();
            assert!((width - expected).abs() < 1e-12);
            assert!(((hi - 10.0) - (10.0 - lo)).abs() < 1e-12);
            assert!(width > prev);
            prev = width;
        }
    }
}
