//! Scoring module - line clear points and level progression
//!
//! - Line clear points use a fixed non-linear table multiplied by the level.
//! - Level is always derived from cumulative lines, never incremented.
//! - Gravity interval is derived from level and floored.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_FLOOR_MS, DROP_INTERVAL_STEP_MS, HARD_DROP_POINTS_PER_ROW,
    LINES_PER_LEVEL, LINE_SCORES,
};

/// Calculate line clear score
/// lines: number of lines cleared at once (0-4)
/// level: current level (1-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    LINE_SCORES
        .get(lines)
        .map_or(0, |base| base.saturating_mul(level))
}

/// Level for a cumulative line count (starts at 1, +1 every 10 lines)
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level, in milliseconds
pub fn get_drop_interval_ms(level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(DROP_INTERVAL_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(reduction)
        .max(DROP_INTERVAL_FLOOR_MS)
}

/// Points for a hard drop that descended `rows` rows
pub fn calculate_drop_score(rows: u32) -> u32 {
    rows.saturating_mul(HARD_DROP_POINTS_PER_ROW)
}

/// Score, lines, level and gravity speed of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Progression {
    score: u32,
    lines: u32,
    level: u32,
    drop_interval_ms: u32,
}

impl Progression {
    pub fn new() -> Self {
        Self::from_lines(0, 0)
    }

    /// Progression with the given totals; level and interval are derived.
    pub fn from_lines(score: u32, lines: u32) -> Self {
        let level = calculate_level(lines);
        Self {
            score,
            lines,
            level,
            drop_interval_ms: get_drop_interval_ms(level),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    /// Add points that do not come from clearing lines (drop bonus).
    pub fn add_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Record `cleared` lines removed at once and return the points awarded.
    ///
    /// Points use the level in effect before the clear.
    pub fn record_clear(&mut self, cleared: usize) -> u32 {
        if cleared == 0 {
            return 0;
        }

        let points = calculate_line_score(cleared, self.level);
        self.lines = self.lines.saturating_add(cleared as u32);
        self.score = self.score.saturating_add(points);
        self.level = calculate_level(self.lines);
        self.drop_interval_ms = get_drop_interval_ms(self.level);
        points
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

/// Clear full rows and fold the result into the progression.
/// Returns the number of rows cleared.
pub fn apply_clear(board: &mut Board, progression: &mut Progression) -> usize {
    let cleared = board.clear_full_rows();
    progression.record_clear(cleared);
    cleared
}
