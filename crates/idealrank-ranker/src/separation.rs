//! Separation measures: distance of each candidate to PIS and NIS.

use idealrank_common::{IdealRankError, Result};
use serde::Serialize;
use tracing::debug;

use crate::ideals::IdealSolutions;
use crate::table::Matrix;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Separation {
    pub to_positive: Vec<f64>,
    pub to_negative: Vec<f64>,
}

/// Euclidean distance over the attributes present in `row`.
/// A missing cell contributes nothing, it is not read as zero.
pub fn distance_present(row: &[Option<f64>], target: &[f64]) -> f64 {
    row.iter()
        .zip(target)
        .filter_map(|(cell, t)| cell.map(|v| (v - t) * (v - t)))
        .sum::<f64>()
        .sqrt()
}

pub fn calculate_separation(weighted: &Matrix, ideals: &IdealSolutions) -> Result<Separation> {
    let n = weighted.cols();
    if ideals.positive.len() != n {
        return Err(IdealRankError::dimension(n, ideals.positive.len(), "PIS length"));
    }
    if ideals.negative.len() != n {
        return Err(IdealRankError::dimension(n, ideals.negative.len(), "NIS length"));
    }

    let (to_positive, to_negative) = weighted
        .iter_rows()
        .map(|row| {
            (
                distance_present(row, &ideals.positive),
                distance_present(row, &ideals.negative),
            )
        })
        .unzip();

    let separation = Separation { to_positive, to_negative };
    debug!(
        dist_pis = ?separation.to_positive,
        dist_nis = ?separation.to_negative,
        "calculated separation measures"
    );
    Ok(separation)
}
