//! Final ordering of candidates by similarity.

use idealrank_common::{IdealRankError, Result};
use serde::Serialize;

use crate::table::DecisionTable;

/// One output row: the candidate's original values plus its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    /// 1-based position after sorting
    pub rank: usize,
    pub candidate: String,
    pub values: Vec<Option<f64>>,
    pub similarity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub index_name: String,
    pub attributes: Vec<String>,
    pub rows: Vec<RankedCandidate>,
}

impl Ranking {
    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.candidate.as_str())
    }

    pub fn best(&self) -> Option<&RankedCandidate> {
        self.rows.first()
    }

    /// Keep only the first `n` rows.
    pub fn truncate(&mut self, n: usize) {
        self.rows.truncate(n);
    }
}

/// Attach `similarity` to the table rows and sort descending.
///
/// The sort is stable: candidates with equal scores keep their input order.
pub fn rank(table: &DecisionTable, similarity: &[f64]) -> Result<Ranking> {
    if similarity.len() != table.candidate_count() {
        return Err(IdealRankError::dimension(
            table.candidate_count(),
            similarity.len(),
            "similarity vector length",
        ));
    }

    let mut rows: Vec<RankedCandidate> = table
        .candidates()
        .iter()
        .zip(table.values().iter_rows())
        .zip(similarity)
        .map(|((candidate, values), &similarity)| RankedCandidate {
            rank: 0,
            candidate: candidate.clone(),
            values: values.to_vec(),
            similarity,
        })
        .collect();

    // slice::sort_by is stable
    rows.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }

    Ok(Ranking {
        index_name: table.index_name().to_string(),
        attributes: table.attributes().to_vec(),
        rows,
    })
}
