//! Fixed-length lag vectors.
//!
//! A lag vector holds the most recent `N` values of a series, most recent first
//! (`lags[0]` is the latest observation). Short histories are padded so the
//! forecaster always sees exactly `N` values.

use nalgebra::DVector;

use crate::math::linear::weighted_sum;

#[derive(Debug, Clone, PartialEq)]
pub struct LagVector {
    values: DVector<f64>,
}

impl LagVector {
    /// Wrap values that are already ordered most-recent-first.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self {
            values: DVector::from_vec(values),
        }
    }

    /// A vector of `len` copies of `value`.
    pub fn constant(value: f64, len: usize) -> Self {
        Self {
            values: DVector::from_element(len, value),
        }
    }

    /// Build from the tail of a chronologically ordered series.
    ///
    /// Takes the last `len` values and reverses them. If fewer than `len` values
    /// exist, the most recent value is repeated until the vector is full; an empty
    /// series yields `len` copies of `fallback`.
    pub fn from_series_tail(series: &[f64], len: usize, fallback: f64) -> Self {
        let Some(&latest) = series.last() else {
            return Self::constant(fallback, len);
        };

        let mut values: Vec<f64> = series.iter().rev().take(len).copied().collect();
        values.resize(len, latest);
        Self::from_values(values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        self.values.as_slice()
    }

    pub fn get(&self, lag: usize) -> Option<f64> {
        self.values.get(lag).copied()
    }

    /// The lag-0 value.
    pub fn latest(&self) -> Option<f64> {
        self.get(0)
    }

    /// Prepend `value` as the new lag 0 and drop the oldest lag.
    ///
    /// Length is preserved.
    pub fn shift_in(&mut self, value: f64) {
        let n = self.values.len();
        if n == 0 {
            return;
        }
        for i in (1..n).rev() {
            self.values[i] = self.values[i - 1];
        }
        self.values[0] = value;
    }

    /// `Σ weights[i] * lags[i]` over the common prefix.
    pub fn weighted_sum(&self, weights: &DVector<f64>) -> f64 {
        weighted_sum(weights, &self.values)
    }
}
