//! End-to-end TOPSIS run over a loaded decision table.

use idealrank_common::{CriteriaConfig, Result};
use serde::Serialize;
use tracing::info;

use crate::ideals::{identify_ideals, CostSet, IdealSolutions};
use crate::normalise::normalise;
use crate::rank::{rank, Ranking};
use crate::separation::{calculate_separation, Separation};
use crate::similarity::calculate_similarity;
use crate::table::{DecisionTable, Matrix};
use crate::weights::{weighted_norm, WeightVector};

/// Caller-supplied parameters for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunParams {
    pub weights: WeightVector,
    pub costs: CostSet,
}

impl RunParams {
    pub fn new(weights: Vec<f64>, costs: impl IntoIterator<Item = usize>) -> Result<Self> {
        Ok(Self { weights: WeightVector::new(weights)?, costs: CostSet::new(costs) })
    }
}

impl TryFrom<&CriteriaConfig> for RunParams {
    type Error = idealrank_common::IdealRankError;

    fn try_from(criteria: &CriteriaConfig) -> Result<Self> {
        Self::new(criteria.weights.clone(), criteria.costs.iter().copied())
    }
}

/// Every artifact a run produced, in stage order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopsisOutcome {
    pub weighted: Matrix,
    pub ideals: IdealSolutions,
    pub separation: Separation,
    pub similarity: Vec<f64>,
    pub ranking: Ranking,
}

/// A decision table, normalised once up front so a degenerate table is
/// reported before any run is attempted.
#[derive(Debug, Clone)]
pub struct Topsis {
    table: DecisionTable,
    normalised: Matrix,
}

impl Topsis {
    pub fn new(table: DecisionTable) -> Result<Self> {
        let normalised = normalise(table.values())?;
        Ok(Self { table, normalised })
    }

    pub fn table(&self) -> &DecisionTable {
        &self.table
    }

    pub fn normalised(&self) -> &Matrix {
        &self.normalised
    }

    /// Weighted normalised matrix, normalised again from the raw table.
    pub fn weighted_norm(&self, weights: &WeightVector) -> Result<Matrix> {
        weighted_norm(self.table.values(), weights)
    }

    pub fn run(&self, params: &RunParams) -> Result<TopsisOutcome> {
        let weighted = self.weighted_norm(&params.weights)?;
        let ideals = identify_ideals(&weighted, &params.costs)?;
        let separation = calculate_separation(&weighted, &ideals)?;
        let similarity = calculate_similarity(&separation)?;
        let ranking = rank(&self.table, &similarity)?;

        if let Some(best) = ranking.best() {
            info!(
                "Ranked {} candidates; best is '{}' with similarity {:.4}",
                ranking.rows.len(),
                best.candidate,
                best.similarity
            );
        }

        Ok(TopsisOutcome { weighted, ideals, separation, similarity, ranking })
    }
}
