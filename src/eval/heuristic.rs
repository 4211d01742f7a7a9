//! 盤面の静的評価
//!
//! 石数差・機動力差・角の数の差・位置評価を重み付きで合計する。
//! 基本評価と、ゲーム段階と確定石を考慮する評価の2種類がある。
//! どちらも盤面を書き換えない純粋な関数なので、探索側から並列に呼んでよい。

use super::phase::{game_phase, GamePhase};
use super::positional::{
    positional_score_stable_with, positional_score_unstable_with, positional_score_with,
};
use super::tables::TermWeights;
use crate::board::BitBoard;
use crate::config::EvalConfig;
use crate::player::{perspective, Player};
use crate::stability::compute_stability;
use rayon::prelude::*;

/// 評価方式
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// 石数差・機動力・角・位置評価
    Basic,
    /// ゲーム段階ごとの重みと確定石の評価を加えたもの
    #[default]
    Stability,
}

impl Strategy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "basic" => Some(Strategy::Basic),
            "stability" | "stable" | "phase" => Some(Strategy::Stability),
            _ => None,
        }
    }
}

/// 重みを掛ける前の各評価項目（すべて自分 - 相手）
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct EvalTerms {
    pub disc_diff: i32,
    pub mobility: i32,
    pub corner_diff: i32,
    pub position: i32,
    pub stable: i32,
}

impl EvalTerms {
    /// 重み付き合計。途中の値が i32 に収まらない場合は飽和させる
    pub fn weighted(&self, weights: &TermWeights) -> i32 {
        [
            (weights.disc_diff, self.disc_diff),
            (weights.mobility, self.mobility),
            (weights.corner, self.corner_diff),
            (weights.position, self.position),
            (weights.stable, self.stable),
        ]
        .iter()
        .fold(0i32, |score, &(weight, term)| {
            score.saturating_add(weight.saturating_mul(term))
        })
    }
}

/// 石数差・機動力差・角の差
fn material_terms(board: &BitBoard, my: Player, opp: Player) -> EvalTerms {
    EvalTerms {
        disc_diff: board.count_discs(my) as i32 - board.count_discs(opp) as i32,
        mobility: board.mobility(my) as i32 - board.mobility(opp) as i32,
        corner_diff: board.count_corners(my) as i32 - board.count_corners(opp) as i32,
        ..EvalTerms::default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Evaluator {
    config: EvalConfig,
}

static DEFAULT_EVALUATOR: Evaluator = Evaluator::new(EvalConfig::DEFAULT);

impl Evaluator {
    pub const fn new(config: EvalConfig) -> Self {
        Evaluator { config }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// 基本評価の各項目
    pub fn basic_terms(&self, board: &BitBoard, turn: i32) -> EvalTerms {
        let (my, opp) = perspective(turn);
        EvalTerms {
            position: positional_score_with(board, my, &self.config.positional),
            ..material_terms(board, my, opp)
        }
    }

    /// 段階・確定石を考慮した評価の各項目
    pub fn stability_terms(&self, board: &BitBoard, turn: i32) -> (GamePhase, EvalTerms) {
        let (my, opp) = perspective(turn);
        let phase = game_phase(board);
        let stability = compute_stability(board);

        let terms = EvalTerms {
            position: positional_score_unstable_with(
                board,
                my,
                &stability,
                &self.config.unstable,
            ),
            stable: positional_score_stable_with(board, my, &stability, &self.config.stable),
            ..material_terms(board, my, opp)
        };
        (phase, terms)
    }

    pub fn evaluate_basic(&self, board: &BitBoard, turn: i32) -> i32 {
        let terms = self.basic_terms(board, turn);
        let score = terms.weighted(&self.config.basic);
        log::trace!("basic eval turn={} {:?} -> {}", turn, terms, score);
        score
    }

    pub fn evaluate_with_stability(&self, board: &BitBoard, turn: i32) -> i32 {
        let (phase, terms) = self.stability_terms(board, turn);
        let score = terms.weighted(self.config.phase_weights(phase));
        log::trace!(
            "stability eval turn={} phase={:?} {:?} -> {}",
            turn,
            phase,
            terms,
            score
        );
        score
    }

    pub fn evaluate(&self, board: &BitBoard, turn: i32, strategy: Strategy) -> i32 {
        match strategy {
            Strategy::Basic => self.evaluate_basic(board, turn),
            Strategy::Stability => self.evaluate_with_stability(board, turn),
        }
    }

    /// 兄弟局面をまとめて並列に評価する。結果は入力と同じ順番
    pub fn evaluate_batch(&self, boards: &[BitBoard], turn: i32, strategy: Strategy) -> Vec<i32> {
        boards
            .par_iter()
            .map(|board| self.evaluate(board, turn, strategy))
            .collect()
    }
}

/// 既定の重みで基本評価
pub fn evaluate_basic(board: &BitBoard, turn: i32) -> i32 {
    DEFAULT_EVALUATOR.evaluate_basic(board, turn)
}

/// 既定の重みで段階・確定石を考慮した評価
pub fn evaluate_with_stability(board: &BitBoard, turn: i32) -> i32 {
    DEFAULT_EVALUATOR.evaluate_with_stability(board, turn)
}

/// 既定の重みで指定方式の評価
pub fn evaluate(board: &BitBoard, turn: i32, strategy: Strategy) -> i32 {
    DEFAULT_EVALUATOR.evaluate(board, turn, strategy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Coord;
    use crate::player::{Cell, BLACK_TURN, WHITE_TURN};

    fn lone_black_corner() -> BitBoard {
        let mut board = BitBoard::empty();
        board.set_cell(Coord::new(0, 0), Cell::Black);
        board
    }

    #[test]
    fn test_initial_board_scores_zero() {
        let board = BitBoard::new();
        for turn in [BLACK_TURN, WHITE_TURN] {
            assert_eq!(evaluate_basic(&board, turn), 0);
            assert_eq!(evaluate_with_stability(&board, turn), 0);
        }
    }

    #[test]
    fn test_lone_corner_basic() {
        let board = lone_black_corner();
        let terms = DEFAULT_EVALUATOR.basic_terms(&board, BLACK_TURN);
        assert_eq!(
            terms,
            EvalTerms {
                disc_diff: 1,
                mobility: 0,
                corner_diff: 1,
                position: 100,
                stable: 0,
            }
        );
        // 10 + 800 + 100 * 100
        assert_eq!(evaluate_basic(&board, BLACK_TURN), 10_810);
        assert_eq!(evaluate_basic(&board, WHITE_TURN), -10_810);
    }

    #[test]
    fn test_lone_corner_with_stability() {
        let board = lone_black_corner();
        let (phase, terms) = DEFAULT_EVALUATOR.stability_terms(&board, BLACK_TURN);
        assert_eq!(phase, GamePhase::Opening);
        assert_eq!(terms.position, 0);
        assert_eq!(terms.stable, 200);
        // 10 + 801 + 100 * 200
        assert_eq!(evaluate_with_stability(&board, BLACK_TURN), 20_811);
        assert_eq!(evaluate_with_stability(&board, WHITE_TURN), -20_811);
    }

    #[test]
    fn test_unknown_turn_value_is_white() {
        let board = lone_black_corner();
        assert_eq!(
            evaluate_basic(&board, 0),
            evaluate_basic(&board, WHITE_TURN)
        );
        assert_eq!(
            evaluate_with_stability(&board, 42),
            evaluate_with_stability(&board, WHITE_TURN)
        );
    }

    #[test]
    fn test_strategy_dispatch() {
        let board = lone_black_corner();
        assert_eq!(
            evaluate(&board, BLACK_TURN, Strategy::Basic),
            evaluate_basic(&board, BLACK_TURN)
        );
        assert_eq!(
            evaluate(&board, BLACK_TURN, Strategy::Stability),
            evaluate_with_stability(&board, BLACK_TURN)
        );
        assert_eq!(Strategy::default(), Strategy::Stability);
        assert_eq!(Strategy::from_name("Basic"), Some(Strategy::Basic));
        assert_eq!(Strategy::from_name("minimax"), None);
    }

    #[test]
    fn test_custom_weights() {
        let mut config = EvalConfig::default();
        config.basic = TermWeights {
            disc_diff: 1,
            mobility: 0,
            corner: 0,
            position: 0,
            stable: 0,
        };
        let evaluator = Evaluator::new(config);
        assert_eq!(evaluator.evaluate_basic(&lone_black_corner(), BLACK_TURN), 1);
    }

    #[test]
    fn test_huge_weights_saturate() {
        // 黒が角、白が X 打ち: 位置評価は黒から見て 150
        let mut board = lone_black_corner();
        board.set_cell(Coord::new(1, 1), Cell::White);

        let mut config = EvalConfig::default();
        config.basic.position = i32::MAX;
        let evaluator = Evaluator::new(config);

        assert_eq!(evaluator.evaluate_basic(&board, BLACK_TURN), i32::MAX);
        assert_eq!(evaluator.evaluate_basic(&board, WHITE_TURN), i32::MIN);
    }

    #[test]
    fn test_weighted_sum_saturates_on_addition() {
        let terms = EvalTerms {
            disc_diff: 1,
            mobility: 1,
            corner_diff: 0,
            position: 0,
            stable: 0,
        };
        let weights = TermWeights {
            disc_diff: i32::MAX,
            mobility: i32::MAX,
            corner: 0,
            position: 0,
            stable: 0,
        };
        assert_eq!(terms.weighted(&weights), i32::MAX);
    }

    #[test]
    fn test_batch_matches_sequential() {
        let boards = vec![BitBoard::new(), lone_black_corner(), BitBoard::empty()];
        let evaluator = Evaluator::default();
        for strategy in [Strategy::Basic, Strategy::Stability] {
            let expected: Vec<i32> = boards
                .iter()
                .map(|b| evaluator.evaluate(b, BLACK_TURN, strategy))
                .collect();
            assert_eq!(
                evaluator.evaluate_batch(&boards, BLACK_TURN, strategy),
                expected
            );
        }
    }
}
