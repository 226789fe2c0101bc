//! Weighted linear combinations.

use nalgebra::DVector;

/// Dot product of `weights` and `values` over their common prefix.
///
/// Mismatched lengths are truncated rather than rejected; the lag vectors used
/// by the forecaster are sized from the weights, so this only matters for
/// hand-built inputs.
pub fn weighted_sum(weights: &DVector<f64>, values: &DVector<f64>) -> f64 {
    let n = weights.len().min(values.len());
    weights.rows(0, n).dot(&values.rows(0, n))
}
