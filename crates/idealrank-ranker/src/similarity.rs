//! Relative closeness to the ideal solution.

use idealrank_common::{IdealRankError, Result};
use tracing::debug;

use crate::separation::Separation;

/// s = d⁻ / (d⁺ + d⁻), in [0, 1].
///
/// A candidate at zero distance from both ideals has no defined score and
/// fails the run with `DegenerateInput`.
pub fn calculate_similarity(separation: &Separation) -> Result<Vec<f64>> {
    let Separation { to_positive, to_negative } = separation;
    if to_positive.len() != to_negative.len() {
        return Err(IdealRankError::dimension(
            to_positive.len(),
            to_negative.len(),
            "NIS separation length",
        ));
    }

    let similarity = to_positive
        .iter()
        .zip(to_negative)
        .enumerate()
        .map(|(i, (&d_pos, &d_neg))| {
            let total = d_pos + d_neg;
            if total == 0.0 {
                return Err(IdealRankError::DegenerateInput(format!(
                    "candidate {i} coincides with both ideal solutions"
                )));
            }
            Ok(d_neg / total)
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(?similarity, "calculated similarity scores");
    Ok(similarity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores() {
        let sep = Separation { to_positive: vec![0.0, 1.0, 3.0], to_negative: vec![2.0, 1.0, 1.0] };
        assert_eq!(calculate_similarity(&sep).unwrap(), vec![1.0, 0.5, 0.25]);
    }

    #[test]
    fn test_at_negative_ideal_scores_zero() {
        let sep = Separation { to_positive: vec![2.0], to_negative: vec![0.0] };
        assert_eq!(calculate_similarity(&sep).unwrap(), vec![0.0]);
    }

    #[test]
    fn test_both_zero_is_degenerate() {
        let sep = Separation { to_positive: vec![1.0, 0.0], to_negative: vec![1.0, 0.0] };
        let err = calculate_similarity(&sep).unwrap_err();
        match err {
            IdealRankError::DegenerateInput(msg) => assert!(msg.contains("candidate 1"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_length_mismatch() {
        let sep = Separation { to_positive: vec![1.0], to_negative: vec![] };
        assert!(matches!(calculate_similarity(&sep), Err(IdealRankError::DimensionMismatch(_))));
    }
}
