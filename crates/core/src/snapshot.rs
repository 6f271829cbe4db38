use serde::{Deserialize, Serialize};

use crate::piece::ActivePiece;
use crate::pieces::Shape;
use crate::scoring::Progression;
use crate::types::GameStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSnapshot {
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
    pub ghost_y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionSnapshot {
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
}

impl From<Progression> for ProgressionSnapshot {
    fn from(value: Progression) -> Self {
        Self {
            score: value.score(),
            lines: value.lines(),
            level: value.level(),
            drop_interval_ms: value.drop_interval_ms(),
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Cell ids, top row first (0 empty, 1-7 piece kinds).
    pub board: Vec<Vec<u8>>,
    pub active: ActiveSnapshot,
    pub next: Shape,
    pub progression: ProgressionSnapshot,
    pub status: GameStatus,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.status.is_running()
    }
}

impl ActiveSnapshot {
    pub(crate) fn new(piece: ActivePiece, ghost_y: i32) -> Self {
        Self {
            shape: piece.shape,
            x: piece.x,
            y: piece.y,
            ghost_y,
        }
    }
}
