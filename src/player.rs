use std::fmt;

/// 黒番を表す手番指標
pub const BLACK_TURN: i32 = -1;
/// 白番を表す手番指標
pub const WHITE_TURN: i32 = 1;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// 相手のプレイヤーを返す
    #[inline]
    pub fn opponent(&self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// 日本語の名前を返す
    pub fn name(&self) -> &'static str {
        match self {
            Player::Black => "黒",
            Player::White => "白",
        }
    }

    /// 文字表現を返す
    pub fn to_char(&self) -> char {
        match self {
            Player::Black => 'X',
            Player::White => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.to_char())
    }
}

/// 盤面の1マスの状態
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    /// マスを占有しているプレイヤー（空きマスなら None）
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Player::Black),
            Cell::White => Some(Player::White),
        }
    }
}

impl From<Option<Player>> for Cell {
    fn from(owner: Option<Player>) -> Self {
        match owner {
            None => Cell::Empty,
            Some(Player::Black) => Cell::Black,
            Some(Player::White) => Cell::White,
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        Cell::from(Some(player))
    }
}

/// 手番指標から (自分, 相手) を決める
///
/// -1 なら自分が黒、+1 なら自分が白。それ以外の値も白番として扱う。
/// 探索側はこの対応を前提に評価値の符号を解釈しているので変えないこと。
#[inline]
pub fn perspective(turn: i32) -> (Player, Player) {
    if turn == BLACK_TURN {
        (Player::Black, Player::White)
    } else {
        (Player::White, Player::Black)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_is_involution() {
        assert_eq!(Player::Black.opponent(), Player::White);
        assert_eq!(Player::White.opponent(), Player::Black);
        assert_eq!(Player::Black.opponent().opponent(), Player::Black);
    }

    #[test]
    fn test_perspective_mapping() {
        assert_eq!(perspective(BLACK_TURN), (Player::Black, Player::White));
        assert_eq!(perspective(WHITE_TURN), (Player::White, Player::Black));
        // 想定外の値は白番扱い
        assert_eq!(perspective(0), (Player::White, Player::Black));
        assert_eq!(perspective(7), (Player::White, Player::Black));
    }

    #[test]
    fn test_cell_conversion() {
        assert_eq!(Cell::from(None), Cell::Empty);
        assert_eq!(Cell::from(Player::Black), Cell::Black);
        assert_eq!(Cell::White.player(), Some(Player::White));
        assert_eq!(Cell::default().player(), None);
    }
}
