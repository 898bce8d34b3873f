pub mod config;
pub mod engine;
pub mod rank;
pub mod validation;

pub use config::*;
pub use engine::{calculate_score, score, ScoreBreakdown, ScoreResult, TermContribution};
pub use rank::{confidence, rank, Ranking, ScoredOption, MAX_CONFIDENCE, MIN_CONFIDENCE};
pub use validation::validate_weights;
