//! 確定石の判定
//!
//! 石のある角を起点に、同じ色の石が8方向へ途切れず続く範囲を確定石とみなす。
//! 厳密な「二度と返らない」判定ではなく近似だが、評価テーブルはこの近似を
//! 前提に調整されているので結果を変えないこと。

use crate::board::{coords, BitBoard, Coord, BOARD_SIZE, CORNERS, DIRECTIONS};
use std::collections::VecDeque;

/// 確定石のマップ。ビット位置は BitBoard と同じ (row * 8 + col)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StabilityMap(u64);

impl StabilityMap {
    #[inline]
    pub fn is_stable(&self, coord: Coord) -> bool {
        self.0 & coord.bit() != 0
    }

    /// 確定石のビットマスク
    #[inline]
    pub fn mask(&self) -> u64 {
        self.0
    }

    /// 確定石の数
    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    /// 確定石の座標を昇順に列挙
    pub fn iter(&self) -> impl Iterator<Item = Coord> {
        coords(self.0)
    }

    /// 8x8 の真偽値配列に変換
    pub fn to_grid(&self) -> [[bool; BOARD_SIZE]; BOARD_SIZE] {
        let mut grid = [[false; BOARD_SIZE]; BOARD_SIZE];
        for coord in self.iter() {
            grid[coord.row()][coord.col()] = true;
        }
        grid
    }

    #[inline]
    fn mark(&mut self, coord: Coord) {
        self.0 |= coord.bit();
    }
}

/// 石のある角すべてを起点にした幅優先探索で確定石を求める
pub fn compute_stability(board: &BitBoard) -> StabilityMap {
    let mut stable = StabilityMap::default();
    let mut queue = VecDeque::with_capacity(BOARD_SIZE * BOARD_SIZE);

    // 空いている角からは何も広がらない
    for &corner in CORNERS.iter() {
        if board.get_disc(corner).is_some() {
            stable.mark(corner);
            queue.push_back(corner);
        }
    }

    while let Some(current) = queue.pop_front() {
        let Some(owner) = board.get_disc(current) else {
            continue;
        };

        for &(dr, dc) in DIRECTIONS.iter() {
            let mut next = current.offset(dr, dc);
            while let Some(coord) = next {
                if board.get_disc(coord) != Some(owner) || stable.is_stable(coord) {
                    break;
                }
                stable.mark(coord);
                queue.push_back(coord);
                next = coord.offset(dr, dc);
            }
        }
    }

    stable
}

impl BitBoard {
    /// この盤面の確定石マップ
    pub fn stability(&self) -> StabilityMap {
        compute_stability(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{Cell, Player};

    #[test]
    fn test_empty_board_has_no_stable_discs() {
        assert_eq!(compute_stability(&BitBoard::empty()).count(), 0);
        assert_eq!(compute_stability(&BitBoard::new()).count(), 0);
    }

    #[test]
    fn test_lone_corner_is_stable() {
        let mut board = BitBoard::empty();
        board.set_cell(Coord::new(0, 0), Cell::Black);

        let stable = compute_stability(&board);
        assert_eq!(stable.count(), 1);
        assert!(stable.is_stable(Coord::new(0, 0)));
    }

    #[test]
    fn test_run_along_edge_and_diagonal() {
        let board: BitBoard = "
            XXX.....
            XX......
            X.X.....
            ...X....
            ........
            ........
            ........
            ........"
            .parse()
            .unwrap();

        let stable = compute_stability(&board);
        assert_eq!(stable.mask(), board.discs(Player::Black));
    }

    #[test]
    fn test_walk_stops_at_opponent_disc() {
        let board: BitBoard = "
            XOX.....
            ........
            ........
            ........
            ........
            ........
            ........
            ........"
            .parse()
            .unwrap();

        let stable = compute_stability(&board);
        assert!(stable.is_stable(Coord::new(0, 0)));
        assert!(!stable.is_stable(Coord::new(0, 1)));
        assert!(!stable.is_stable(Coord::new(0, 2)));
    }

    #[test]
    fn test_each_corner_spreads_its_own_colour() {
        let board: BitBoard = "
            XX....OO
            ........
            ........
            ........
            ........
            ........
            O.......
            OO.....X"
            .parse()
            .unwrap();

        let stable = compute_stability(&board);
        let grid = stable.to_grid();
        assert!(grid[0][1]);
        assert!(grid[0][6]);
        assert!(grid[6][0]);
        assert!(grid[7][1]);
        assert_eq!(stable.count(), 8);
    }

    #[test]
    fn test_idempotent() {
        let board: BitBoard = "
            XXXXOOOO
            XXOOOOOX
            X.X.O...
            ...X....
            ....O...
            ........
            O.......
            OO.....X"
            .parse()
            .unwrap();
        assert_eq!(compute_stability(&board), compute_stability(&board));
        assert_eq!(board.stability(), compute_stability(&board));
    }
}
