use crate::board::BitBoard;
use std::fmt;

/// 空きマスがこれより多ければ序盤
pub const OPENING_EMPTY_THRESHOLD: u32 = 44;
/// 空きマスがこれより多ければ中盤、以下なら終盤
pub const MIDGAME_EMPTY_THRESHOLD: u32 = 20;

/// 空きマスの数で決まるゲームの段階
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GamePhase {
    Opening,
    Midgame,
    Endgame,
}

impl GamePhase {
    pub fn from_empty_count(empty_count: u32) -> Self {
        if empty_count > OPENING_EMPTY_THRESHOLD {
            GamePhase::Opening
        } else if empty_count > MIDGAME_EMPTY_THRESHOLD {
            GamePhase::Midgame
        } else {
            GamePhase::Endgame
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GamePhase::Opening => "序盤",
            GamePhase::Midgame => "中盤",
            GamePhase::Endgame => "終盤",
        };
        f.write_str(name)
    }
}

/// 盤面のゲーム段階
pub fn game_phase(board: &BitBoard) -> GamePhase {
    GamePhase::from_empty_count(board.empty_count())
}
