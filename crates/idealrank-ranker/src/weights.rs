//! Attribute weight vector and the weighting stage.

use idealrank_common::{IdealRankError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::normalise::normalise;
use crate::table::Matrix;

/// One non-negative weight per attribute, in column order.
/// Sum-to-one is the caller's business; see [`WeightVector::is_unit_sum`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightVector(Vec<f64>);

impl WeightVector {
    pub fn new(weights: Vec<f64>) -> Result<Self> {
        if let Some((j, w)) = weights.iter().enumerate().find(|(_, w)| !w.is_finite() || **w < 0.0) {
            return Err(IdealRankError::InvalidParameter(format!(
                "weight {j} must be a non-negative finite number, got {w}"
            )));
        }
        Ok(Self(weights))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Whether the weights sum to ~1.0
    pub fn is_unit_sum(&self) -> bool {
        (self.sum() - 1.0).abs() < 1e-6
    }

    /// Copy rescaled to sum to 1.0. All-zero weights are returned unchanged.
    pub fn normalised(&self) -> Self {
        let sum = self.sum();
        if sum > 0.0 {
            Self(self.0.iter().map(|w| w / sum).collect())
        } else {
            self.clone()
        }
    }
}

/// Normalise `values` afresh, then scale column j by `weights[j]`.
///
/// Normalisation is repeated on every call rather than taken from any
/// earlier result, so the output depends only on the arguments.
pub fn weighted_norm(values: &Matrix, weights: &WeightVector) -> Result<Matrix> {
    if weights.len() != values.cols() {
        return Err(IdealRankError::dimension(values.cols(), weights.len(), "weight vector length"));
    }
    if !weights.is_unit_sum() {
        warn!(sum = weights.sum(), "attribute weights do not sum to 1.0");
    }

    let normed = normalise(values)?;
    let w = weights.as_slice();
    let weighted = normed.map_present(|j, v| v * w[j]);
    debug!(weights = ?w, "applied attribute weights");
    Ok(weighted)
}
