//! 重みテーブルによる位置評価
//!
//! 自分の石のマスは重みを加算、相手の石のマスは減算、空きマスは無視する。

use super::tables::{WeightTable, POSITION_WEIGHTS, STABLE_WEIGHTS, UNSTABLE_WEIGHTS};
use crate::board::BitBoard;
use crate::player::Player;
use crate::stability::StabilityMap;

/// mask の範囲だけ重みを合計する
#[inline]
fn weighted_sum(board: &BitBoard, player: Player, table: &WeightTable, mask: u64) -> i32 {
    let (my_bits, opp_bits) = board.split(player);

    let mut score = 0;

    // 自分の石の位置評価
    let mut bits = my_bits & mask;
    while bits != 0 {
        let pos = bits.trailing_zeros() as usize;
        score += table[pos / 8][pos % 8];
        bits &= bits - 1; // 最下位ビットをクリア
    }

    // 相手の石の位置評価
    bits = opp_bits & mask;
    while bits != 0 {
        let pos = bits.trailing_zeros() as usize;
        score -= table[pos / 8][pos % 8];
        bits &= bits - 1;
    }

    score
}

/// 盤面全体の位置評価
pub fn positional_score(board: &BitBoard, player: Player) -> i32 {
    positional_score_with(board, player, &POSITION_WEIGHTS)
}

pub fn positional_score_with(board: &BitBoard, player: Player, table: &WeightTable) -> i32 {
    weighted_sum(board, player, table, !0u64)
}

/// 確定石だけの位置評価
pub fn positional_score_stable(board: &BitBoard, player: Player, stability: &StabilityMap) -> i32 {
    positional_score_stable_with(board, player, stability, &STABLE_WEIGHTS)
}

pub fn positional_score_stable_with(
    board: &BitBoard,
    player: Player,
    stability: &StabilityMap,
    table: &WeightTable,
) -> i32 {
    weighted_sum(board, player, table, stability.mask())
}

/// 確定していない石だけの位置評価
pub fn positional_score_unstable(
    board: &BitBoard,
    player: Player,
    stability: &StabilityMap,
) -> i32 {
    positional_score_unstable_with(board, player, stability, &UNSTABLE_WEIGHTS)
}

pub fn positional_score_unstable_with(
    board: &BitBoard,
    player: Player,
    stability: &StabilityMap,
    table: &WeightTable,
) -> i32 {
    weighted_sum(board, player, table, !stability.mask())
}
