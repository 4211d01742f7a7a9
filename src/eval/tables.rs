//! 評価関数の重み付け定数

use serde::Serialize;

/// 8x8 の位置重みテーブル。添字は [行][列]
pub type WeightTable = [[i32; 8]; 8];

/// 位置評価の重み。角は高く、角の隣は危険なのでマイナス
pub const POSITION_WEIGHTS: WeightTable = [
    [100, -20, 10, 5, 5, 10, -20, 100],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [10, -2, 3, 2, 2, 3, -2, 10],
    [5, -2, 2, 1, 1, 2, -2, 5],
    [5, -2, 2, 1, 1, 2, -2, 5],
    [10, -2, 3, 2, 2, 3, -2, 10],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [100, -20, 10, 5, 5, 10, -20, 100],
];

/// 確定石の重み。角と辺を重視する
pub const STABLE_WEIGHTS: WeightTable = [
    [200, 100, 100, 100, 100, 100, 100, 200],
    [100, 10, 10, 10, 10, 10, 10, 100],
    [100, 10, 10, 10, 10, 10, 10, 100],
    [100, 10, 10, 10, 10, 10, 10, 100],
    [100, 10, 10, 10, 10, 10, 10, 100],
    [100, 10, 10, 10, 10, 10, 10, 100],
    [100, 10, 10, 10, 10, 10, 10, 100],
    [200, 100, 100, 100, 100, 100, 100, 200],
];

/// 確定していない石の重み
pub const UNSTABLE_WEIGHTS: WeightTable = POSITION_WEIGHTS;

/// 各評価項目に掛ける重み
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TermWeights {
    /// 石数差（-64 〜 64）
    pub disc_diff: i32,
    /// 機動力差（おおよそ -30 〜 30）
    pub mobility: i32,
    /// 角の数の差（-4 〜 4）
    pub corner: i32,
    /// 位置評価（おおよそ -1200 〜 1200）
    pub position: i32,
    /// 確定石の位置評価
    pub stable: i32,
}

/// 基本評価の重み。確定石の項は使わない
pub const BASIC_WEIGHTS: TermWeights = TermWeights {
    disc_diff: 10,
    mobility: 78,
    corner: 800,
    position: 100,
    stable: 0,
};

/// 序盤: 機動力重視
pub const OPENING_WEIGHTS: TermWeights = TermWeights {
    disc_diff: 10,
    mobility: 500,
    corner: 801,
    position: 382,
    stable: 100,
};

/// 中盤: 位置重視
pub const MIDGAME_WEIGHTS: TermWeights = TermWeights {
    disc_diff: 10,
    mobility: 78,
    corner: 801,
    position: 682,
    stable: 100,
};

/// 終盤: 石数重視
pub const ENDGAME_WEIGHTS: TermWeights = TermWeights {
    disc_diff: 800,
    mobility: 10,
    corner: 1000,
    position: 10,
    stable: 100,
};
