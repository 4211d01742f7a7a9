//! 評価関数の設定
//!
//! 重みテーブルと各項目の重みをまとめたもの。既定値は組み込みの定数で、
//! JSON ファイルから一部だけ上書きすることもできる。

use crate::eval::phase::GamePhase;
use crate::eval::tables::{
    TermWeights, WeightTable, BASIC_WEIGHTS, ENDGAME_WEIGHTS, MIDGAME_WEIGHTS, OPENING_WEIGHTS,
    POSITION_WEIGHTS, STABLE_WEIGHTS, UNSTABLE_WEIGHTS,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read weights file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid weights JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EvalConfigPatch")]
pub struct EvalConfig {
    /// 基本評価の位置テーブル
    pub positional: WeightTable,
    /// 確定石テーブル
    pub stable: WeightTable,
    /// 非確定石テーブル
    pub unstable: WeightTable,
    pub basic: TermWeights,
    pub opening: TermWeights,
    pub midgame: TermWeights,
    pub endgame: TermWeights,
}

impl EvalConfig {
    pub const DEFAULT: EvalConfig = EvalConfig {
        positional: POSITION_WEIGHTS,
        stable: STABLE_WEIGHTS,
        unstable: UNSTABLE_WEIGHTS,
        basic: BASIC_WEIGHTS,
        opening: OPENING_WEIGHTS,
        midgame: MIDGAME_WEIGHTS,
        endgame: ENDGAME_WEIGHTS,
    };

    /// ゲーム段階に応じた重み
    pub fn phase_weights(&self, phase: GamePhase) -> &TermWeights {
        match phase {
            GamePhase::Opening => &self.opening,
            GamePhase::Midgame => &self.midgame,
            GamePhase::Endgame => &self.endgame,
        }
    }

    /// JSON 文字列から読み込む。書かれていない項目は既定値のまま
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// JSON ファイルから読み込む
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::debug!("loaded evaluation weights from {}", path.display());
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig::DEFAULT
    }
}

/// JSON 上の項目の重み。書かれていない項目は None
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TermWeightsPatch {
    disc_diff: Option<i32>,
    mobility: Option<i32>,
    corner: Option<i32>,
    position: Option<i32>,
    stable: Option<i32>,
}

impl TermWeightsPatch {
    fn apply(self, base: TermWeights) -> TermWeights {
        TermWeights {
            disc_diff: self.disc_diff.unwrap_or(base.disc_diff),
            mobility: self.mobility.unwrap_or(base.mobility),
            corner: self.corner.unwrap_or(base.corner),
            position: self.position.unwrap_or(base.position),
            stable: self.stable.unwrap_or(base.stable),
        }
    }
}

/// JSON 上の設定。書かれていない項目はそれぞれの既定値で埋める
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct EvalConfigPatch {
    positional: Option<WeightTable>,
    stable: Option<WeightTable>,
    unstable: Option<WeightTable>,
    basic: TermWeightsPatch,
    opening: TermWeightsPatch,
    midgame: TermWeightsPatch,
    endgame: TermWeightsPatch,
}

impl From<EvalConfigPatch> for EvalConfig {
    fn from(patch: EvalConfigPatch) -> Self {
        let base = EvalConfig::DEFAULT;
        EvalConfig {
            positional: patch.positional.unwrap_or(base.positional),
            stable: patch.stable.unwrap_or(base.stable),
            unstable: patch.unstable.unwrap_or(base.unstable),
            basic: patch.basic.apply(base.basic),
            opening: patch.opening.apply(base.opening),
            midgame: patch.midgame.apply(base.midgame),
            endgame: patch.endgame.apply(base.endgame),
        }
    }
}
