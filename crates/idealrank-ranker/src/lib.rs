//! idealrank-ranker — TOPSIS ranking pipeline.
//!
//! Stages run in a fixed order, each a pure function over explicit inputs:
//! load → normalise → weight → ideals → separation → similarity → rank.

pub mod table;
pub mod loader;
pub mod normalise;
pub mod weights;
pub mod ideals;
pub mod separation;
pub mod similarity;
pub mod rank;
pub mod render;
pub mod pipeline;

pub use ideals::{identify_ideals, CostSet, IdealSolutions};
pub use loader::{load_path, load_reader, LoaderOptions};
pub use normalise::{global_norm, normalise};
pub use pipeline::{RunParams, Topsis, TopsisOutcome};
pub use rank::{rank, RankedCandidate, Ranking};
pub use render::{render, RenderOptions};
pub use separation::{calculate_separation, Separation};
pub use similarity::calculate_similarity;
pub use table::{DecisionTable, Matrix};
pub use weights::{weighted_norm, WeightVector};
