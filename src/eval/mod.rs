pub mod heuristic;
pub mod phase;
pub mod positional;
pub mod tables;

pub use heuristic::{
    evaluate, evaluate_basic, evaluate_with_stability, EvalTerms, Evaluator, Strategy,
};
pub use phase::{game_phase, GamePhase};
pub use positional::{positional_score, positional_score_stable, positional_score_unstable};
pub use tables::{TermWeights, WeightTable};
