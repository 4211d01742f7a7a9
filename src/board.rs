use crate::player::{Cell, Player};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_BLACK: u64 = 0x0000000810000000; // 初期配置の黒石
const DEFAULT_WHITE: u64 = 0x0000001008000000; // 初期配置の白石

/// 盤面の一辺のマス数
pub const BOARD_SIZE: usize = 8;
/// 盤面のマス数
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// 四隅のマスク
pub const CORNER_MASK: u64 = 0x8100000000000081;

/// 8方向 (行の増分, 列の増分)
pub const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1), // 上左、上、上右
    (0, -1),
    (0, 1), // 左、右
    (1, -1),
    (1, 0),
    (1, 1), // 下左、下、下右
];

/// 四隅の座標
pub const CORNERS: [Coord; 4] = [
    Coord { row: 0, col: 0 },
    Coord { row: 0, col: 7 },
    Coord { row: 7, col: 0 },
    Coord { row: 7, col: 7 },
];

/// 盤上の座標 (行, 列)。どちらも 0..8 の範囲に収まる
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    row: usize,
    col: usize,
}

impl Coord {
    /// 盤外の座標を渡すとパニックする
    pub fn new(row: usize, col: usize) -> Self {
        assert!(
            row < BOARD_SIZE && col < BOARD_SIZE,
            "座標が盤外です: ({}, {})",
            row,
            col
        );
        Coord { row, col }
    }

    /// ビット位置 (row * 8 + col) から座標を作る
    pub fn from_index(pos: usize) -> Self {
        assert!(pos < CELL_COUNT, "ビット位置が範囲外です: {}", pos);
        Coord {
            row: pos / BOARD_SIZE,
            col: pos % BOARD_SIZE,
        }
    }

    #[inline]
    pub fn row(self) -> usize {
        self.row
    }

    #[inline]
    pub fn col(self) -> usize {
        self.col
    }

    #[inline]
    pub fn index(self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    #[inline]
    pub fn bit(self) -> u64 {
        1u64 << self.index()
    }

    /// (dr, dc) だけ進んだ座標。盤外に出る場合は None
    #[inline]
    pub fn offset(self, dr: i32, dc: i32) -> Option<Coord> {
        let r = self.row as i32 + dr;
        let c = self.col as i32 + dc;
        if (0..BOARD_SIZE as i32).contains(&r) && (0..BOARD_SIZE as i32).contains(&c) {
            Some(Coord {
                row: r as usize,
                col: c as usize,
            })
        } else {
            None
        }
    }

    pub fn is_corner(self) -> bool {
        self.bit() & CORNER_MASK != 0
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// ビットマスクに含まれる座標を昇順に列挙する
pub fn coords(mask: u64) -> impl Iterator<Item = Coord> {
    let mut bits = mask;
    std::iter::from_fn(move || {
        if bits == 0 {
            return None;
        }
        let pos = bits.trailing_zeros() as usize;
        bits &= bits - 1; // 最下位ビットをクリア
        Some(Coord::from_index(pos))
    })
}

/// テキスト盤面の読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardParseError {
    #[error("expected 64 cells, got {0}")]
    WrongCellCount(usize),

    #[error("unknown cell character '{0}'")]
    UnknownCell(char),
}

/// 黒石と白石のマスク。両者は重ならない
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BitBoard {
    black: u64,
    white: u64,
}

impl BitBoard {
    /// 新しいビットボードを初期配置で作成
    pub fn new() -> Self {
        BitBoard {
            black: DEFAULT_BLACK,
            white: DEFAULT_WHITE,
        }
    }

    /// 石が1つもない盤面
    pub fn empty() -> Self {
        BitBoard { black: 0, white: 0 }
    }

    /// 黒石と白石のマスクから作成する。両者が重なっていてはならない
    pub fn from_masks(black: u64, white: u64) -> Self {
        assert!(black & white == 0, "黒石と白石が重なっています");
        BitBoard { black, white }
    }

    /// 黒石のマスク
    #[inline]
    pub fn black(&self) -> u64 {
        self.black
    }

    /// 白石のマスク
    #[inline]
    pub fn white(&self) -> u64 {
        self.white
    }

    /// 8x8 のマス配列から作成
    pub fn from_grid(grid: &[[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        let mut board = BitBoard::empty();
        for (row, cells) in grid.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                board.set_cell(Coord::new(row, col), cell);
            }
        }
        board
    }

    /// 8x8 のマス配列に変換
    pub fn to_grid(&self) -> [[Cell; BOARD_SIZE]; BOARD_SIZE] {
        let mut grid = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (row, cells) in grid.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = self.cell(Coord::new(row, col));
            }
        }
        grid
    }

    /// 指定マスの状態を書き換える
    pub fn set_cell(&mut self, coord: Coord, cell: Cell) {
        let bit = coord.bit();
        self.black &= !bit;
        self.white &= !bit;
        match cell {
            Cell::Black => self.black |= bit,
            Cell::White => self.white |= bit,
            Cell::Empty => {}
        }
    }

    /// (自分の石, 相手の石)
    #[inline(always)]
    pub fn split(&self, player: Player) -> (u64, u64) {
        debug_assert!(self.black & self.white == 0, "黒石と白石が重なっています");
        match player {
            Player::Black => (self.black, self.white),
            Player::White => (self.white, self.black),
        }
    }

    #[inline]
    pub fn discs(&self, player: Player) -> u64 {
        self.split(player).0
    }

    #[inline]
    pub fn occupied(&self) -> u64 {
        self.black | self.white
    }

    /// 指定位置の石を取得
    #[inline]
    pub fn get_disc(&self, coord: Coord) -> Option<Player> {
        let bit = coord.bit();

        if (self.black & bit) != 0 {
            Some(Player::Black)
        } else if (self.white & bit) != 0 {
            Some(Player::White)
        } else {
            None
        }
    }

    #[inline]
    pub fn cell(&self, coord: Coord) -> Cell {
        Cell::from(self.get_disc(coord))
    }

    /// 石の数をカウント
    #[inline]
    pub fn count_discs(&self, player: Player) -> u32 {
        self.discs(player).count_ones()
    }

    /// 両プレイヤーの石の数を取得
    pub fn count_all_discs(&self) -> (u32, u32) {
        (self.black.count_ones(), self.white.count_ones())
    }

    /// 空きマスの数
    #[inline]
    pub fn empty_count(&self) -> u32 {
        CELL_COUNT as u32 - self.occupied().count_ones()
    }

    /// 取っている角の数
    #[inline]
    pub fn count_corners(&self, player: Player) -> u32 {
        (self.discs(player) & CORNER_MASK).count_ones()
    }

    /// origin から (dr, dc) 方向へ相手の石が続く限り進む。
    /// 自分の石で止まった場合は挟んだ石のマスクを、そうでなければ 0 を返す
    #[inline]
    fn sweep(&self, origin: Coord, (dr, dc): (i32, i32), player: Player) -> u64 {
        let (my, opp) = self.split(player);
        let mut flips = 0u64;
        let mut next = origin.offset(dr, dc);

        while let Some(coord) = next {
            let bit = coord.bit();
            if opp & bit != 0 {
                flips |= bit;
                next = coord.offset(dr, dc);
            } else if my & bit != 0 {
                return flips;
            } else {
                return 0;
            }
        }

        0 // 盤端に到達
    }

    /// ひっくり返る石のマスク
    pub fn compute_flips(&self, coord: Coord, player: Player) -> u64 {
        DIRECTIONS
            .iter()
            .fold(0u64, |flips, &dir| flips | self.sweep(coord, dir, player))
    }

    /// 合法手かどうか。どれか1方向で挟めれば合法
    #[inline]
    pub fn is_legal_move(&self, coord: Coord, player: Player) -> bool {
        if self.occupied() & coord.bit() != 0 {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&dir| self.sweep(coord, dir, player) != 0)
    }

    /// 合法手の一覧をビットボードとして取得
    pub fn get_legal_moves(&self, player: Player) -> u64 {
        coords(!self.occupied())
            .filter(|&coord| self.is_legal_move(coord, player))
            .fold(0u64, |moves, coord| moves | coord.bit())
    }

    /// 合法手の一覧を座標のベクターとして取得
    pub fn valid_moves(&self, player: Player) -> Vec<Coord> {
        coords(self.get_legal_moves(player)).collect()
    }

    /// 合法手の数（機動力）
    #[inline]
    pub fn mobility(&self, player: Player) -> u32 {
        self.get_legal_moves(player).count_ones()
    }

    /// 石を置いてひっくり返す。不正な手なら盤面を変えずに false を返す
    pub fn make_move(&mut self, coord: Coord, player: Player) -> bool {
        let pos_bit = coord.bit();

        // 既に石が置かれているかチェック
        if self.occupied() & pos_bit != 0 {
            return false;
        }

        let flips = self.compute_flips(coord, player);

        // ひっくり返せる石がなければ不正な手
        if flips == 0 {
            return false;
        }

        match player {
            Player::Black => {
                self.black |= pos_bit | flips;
                self.white &= !flips;
            }
            Player::White => {
                self.white |= pos_bit | flips;
                self.black &= !flips;
            }
        }

        true
    }

    /// パス判定
    pub fn is_pass_required(&self, player: Player) -> bool {
        self.get_legal_moves(player) == 0
    }

    /// ゲーム終了判定
    pub fn is_game_over(&self) -> bool {
        // 空きマスがなければ終了
        if self.occupied() == !0u64 {
            return true;
        }

        self.is_pass_required(Player::Black) && self.is_pass_required(Player::White)
    }
}

impl Default for BitBoard {
    fn default() -> Self {
        BitBoard::new()
    }
}

impl fmt::Display for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  0 1 2 3 4 5 6 7")?;

        for row in 0..BOARD_SIZE {
            write!(f, "{}|", row)?;

            for col in 0..BOARD_SIZE {
                match self.get_disc(Coord::new(row, col)) {
                    Some(player) => write!(f, "{}|", player.to_char())?,
                    None => write!(f, " |")?,
                }
            }

            writeln!(f)?;
        }

        let (black_count, white_count) = self.count_all_discs();
        writeln!(f, "黒(X): {} 白(O): {}", black_count, white_count)
    }
}

impl FromStr for BitBoard {
    type Err = BoardParseError;

    /// `X`/`B` が黒、`O`/`W` が白、`.`/`-`/`_` が空き。空白は無視する
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = BitBoard::empty();
        let mut count = 0usize;

        for ch in s.chars().filter(|c| !c.is_whitespace()) {
            let cell = match ch {
                'X' | 'x' | 'B' | 'b' => Cell::Black,
                'O' | 'o' | 'W' | 'w' => Cell::White,
                '.' | '-' | '_' => Cell::Empty,
                other => return Err(BoardParseError::UnknownCell(other)),
            };
            if count < CELL_COUNT {
                board.set_cell(Coord::from_index(count), cell);
            }
            count += 1;
        }

        if count != CELL_COUNT {
            return Err(BoardParseError::WrongCellCount(count));
        }
        Ok(board)
    }
}

/// 初期配置からランダムな合法手を plies 手打った局面と、次の手番を返す。
/// パスは手数に数えない。両者とも打てなくなったらそこで止める
pub fn random_playout<R: Rng + ?Sized>(rng: &mut R, plies: usize) -> (BitBoard, Player) {
    let mut board = BitBoard::new();
    let mut current = Player::Black;
    let mut placed = 0;

    while placed < plies {
        let moves = board.valid_moves(current);
        match moves.choose(&mut *rng) {
            Some(&coord) => {
                board.make_move(coord, current);
                placed += 1;
                current = current.opponent();
            }
            None => {
                if board.is_pass_required(current.opponent()) {
                    break;
                }
                current = current.opponent();
            }
        }
    }

    log::debug!(
        "random playout: {} plies, {} empty, next {:?}",
        placed,
        board.empty_count(),
        current
    );
    (board, current)
}
