//! othello-eval - オセロの静的評価関数
//!
//! 盤面と手番から、探索（ミニマックス等）が局面の優劣を比べるための
//! 評価値を1つ返す。合法手の列挙、角の占有、位置の重み付け、
//! 角から広げる確定石の判定を、ゲーム段階に応じた重みで組み合わせる。

pub mod board;
pub mod config;
pub mod eval;
pub mod player;
pub mod stability;

pub use board::{random_playout, BitBoard, BoardParseError, Coord};
pub use config::{ConfigError, EvalConfig};
pub use eval::{
    evaluate, evaluate_basic, evaluate_with_stability, game_phase, positional_score,
    positional_score_stable, positional_score_unstable, EvalTerms, Evaluator, GamePhase, Strategy,
};
pub use player::{perspective, Cell, Player, BLACK_TURN, WHITE_TURN};
pub use stability::{compute_stability, StabilityMap};
