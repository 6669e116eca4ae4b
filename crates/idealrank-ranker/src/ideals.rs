//! Positive and negative ideal solutions.

use std::collections::BTreeSet;

use idealrank_common::{IdealRankError, Result};
use serde::Serialize;
use tracing::debug;

use crate::table::Matrix;

/// Attribute positions (0-based) where a lower value is preferred.
/// Every other attribute is a benefit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CostSet(BTreeSet<usize>);

impl CostSet {
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        Self(indices.into_iter().collect())
    }

    pub fn is_cost(&self, column: usize) -> bool {
        self.0.contains(&column)
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// Every index must address one of `attribute_count` columns.
    pub fn check_bounds(&self, attribute_count: usize) -> Result<()> {
        match self.0.iter().next_back() {
            Some(&max) if max >= attribute_count => Err(IdealRankError::DimensionMismatch(format!(
                "cost index {max} out of range for {attribute_count} attributes"
            ))),
            _ => Ok(()),
        }
    }
}

/// PIS and NIS, one value per attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdealSolutions {
    pub positive: Vec<f64>,
    pub negative: Vec<f64>,
}

/// Column-wise best and worst of the weighted table, honouring direction.
pub fn identify_ideals(weighted: &Matrix, costs: &CostSet) -> Result<IdealSolutions> {
    costs.check_bounds(weighted.cols())?;

    let mut positive = Vec::with_capacity(weighted.cols());
    let mut negative = Vec::with_capacity(weighted.cols());

    for j in 0..weighted.cols() {
        let (min, max) = weighted
            .column_present(j)
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
            .ok_or(IdealRankError::InsufficientData { column: j })?;

        if costs.is_cost(j) {
            positive.push(min);
            negative.push(max);
        } else {
            positive.push(max);
            negative.push(min);
        }
    }

    debug!(pis = ?positive, nis = ?negative, "identified ideal solutions");
    Ok(IdealSolutions { positive, negative })
}
