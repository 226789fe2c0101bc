//! The fixed-weight lagged linear model.
//!
//! ```text
//! value = intercept
//!       + scale * Σ sentiment_weight[i] * sentiment_lag[i]
//!       + Σ inflation_weight[j] * inflation_lag[j]
//! ```
//!
//! Weights are configuration, not estimates; nothing here is fitted.

use nalgebra::DVector;
use serde::Serialize;

use crate::domain::ModelParams;
use crate::math::LagVector;

/// Additive decomposition of a single forecast value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastBreakdown {
    /// `scale * Σ ws·s`, in percentage points.
    pub sentiment_effect: f64,
    /// `Σ wi·i`, in percentage points.
    pub inflation_momentum: f64,
    pub intercept: f64,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct LagModel {
    sentiment_weights: DVector<f64>,
    inflation_weights: DVector<f64>,
    scale_factor: f64,
    intercept: f64,
}

impl LagModel {
    pub fn new(params: &ModelParams) -> Self {
        Self {
            sentiment_weights: DVector::from_column_slice(&params.sentiment_weights),
            inflation_weights: DVector::from_column_slice(&params.inflation_weights),
            scale_factor: params.scale_factor,
            intercept: params.intercept,
        }
    }

    pub fn sentiment_lags(&self) -> usize {
        self.sentiment_weights.len()
    }

    pub fn inflation_lags(&self) -> usize {
        self.inflation_weights.len()
    }

    /// Single-step point forecast. Pure and infallible.
    pub fn forecast(&self, sentiment: &LagVector, inflation: &LagVector) -> f64 {
        self.decompose(sentiment, inflation).value
    }

    pub fn decompose(&self, sentiment: &LagVector, inflation: &LagVector) -> ForecastBreakdown {
        let sentiment_effect = self.scale_factor * sentiment.weighted_sum(&self.sentiment_weights);
        let inflation_momentum = inflation.weighted_sum(&self.inflation_weights);
        ForecastBreakdown {
            sentiment_effect,
            inflation_momentum,
            intercept: self.intercept,
            value: self.intercept + sentiment_effect + inflation_momentum,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lags(values: &[f64]) -> LagVector {
        LagVector::from_values(values.to_vec())
    }

    #[test]
    fn zero_lags_return_intercept() {
        let model = LagModel::new(&ModelParams::default());
        let value = model.forecast(&LagVector::constant(0.0, 9), &LagVector::constant(0.0, 4));
        assert_eq!(value, 0.5);
    }

    #[test]
    fn reference_step_matches_hand_calculation() {
        let model = LagModel::new(&ModelParams::default());
        let sentiment = LagVector::constant(5.0, 9);
        let inflation = lags(&[12.3, 12.3, 12.5, 11.7]);

        let b = model.decompose(&sentiment, &inflation);
        // Sentiment weights sum to 3.20.
        assert!((b.sentiment_effect - 0.03 * 5.0 * 3.20).abs() < 1e-12);
        assert!((b.inflation_momentum - 12.29).abs() < 1e-12);
        assert!((b.value - 13.27).abs() < 1e-9);
        assert_eq!(b.value, model.forecast(&sentiment, &inflation));
    }

    #[test]
    fn forecast_is_linear_in_each_lag() {
        let model = LagModel::new(&ModelParams::default());
        let base_s = lags(&[1.0, -2.0, 3.0, 0.5, 0.0, 4.0, -1.0, 2.0, 1.5]);
        let base_i = lags(&[10.0, 9.0, 8.0, 7.0]);
        let base = model.forecast(&base_s, &base_i);
        let k = 3.0;

        for idx in 0..9 {
            let mut zeroed = base_s.as_slice().to_vec();
            zeroed[idx] = 0.0;
            let without = model.forecast(&lags(&zeroed), &base_i);
            let contribution = base - without;

            let mut scaled = base_s.as_slice().to_vec();
            scaled[idx] *= k;
            let with_scaled = model.forecast(&lags(&scaled), &base_i);
            assert!((with_scaled - without - k * contribution).abs() < 1e-9, "sentiment lag {idx}");
        }

        for idx in 0..4 {
            let mut zeroed = base_i.as_slice().to_vec();
            zeroed[idx] = 0.0;
            let without = model.forecast(&base_s, &lags(&zeroed));
            let contribution = base - without;

            let mut scaled = base_i.as_slice().to_vec();
            scaled[idx] *= k;
            let with_scaled = model.forecast(&base_s, &lags(&scaled));
            assert!((with_scaled - without - k * contribution).abs() < 1e-9, "inflation lag {idx}");
        }
    }
}
