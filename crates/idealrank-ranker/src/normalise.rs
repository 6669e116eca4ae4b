//! Global vector normalisation.
//!
//! One divisor for the whole table, not one per column: the square root of
//! the sum of squares of every present value.

use idealrank_common::{IdealRankError, Result};
use tracing::debug;

use crate::table::Matrix;

/// sqrt(Σ v²) over present cells only.
///
/// Summed as `max · sqrt(Σ (v/max)²)` so that finite tables of very large or
/// very small magnitude neither overflow nor underflow the divisor.
pub fn global_norm(values: &Matrix) -> f64 {
    let scale = values.present().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if scale == 0.0 {
        return 0.0;
    }
    scale * values.present().map(|v| (v / scale).powi(2)).sum::<f64>().sqrt()
}

/// Divide every present cell by the global norm. Missing cells stay missing.
pub fn normalise(values: &Matrix) -> Result<Matrix> {
    let norm = global_norm(values);
    if norm == 0.0 {
        return Err(IdealRankError::DegenerateInput(
            "normalisation divisor is 0 (all values zero or missing)".to_string(),
        ));
    }
    if !norm.is_finite() {
        return Err(IdealRankError::DegenerateInput(format!("normalisation divisor is {norm}")));
    }
    debug!(norm, "normalising decision table");
    Ok(values.map_present(|_, v| v / norm))
}
