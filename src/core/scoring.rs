//! Scoring module - classic line-clear scoring and the gravity speed curve
//!
//! Owns the score/lines/level formulas the state machine deliberately knows
//! nothing about: classic NES line scores scaled by level, a level step every
//! ten lines, and a drop interval that shrinks 75 ms per level down to a
//! 100 ms floor.

use crate::core::collab::Scoreboard;
use crate::types::{BASE_DROP_MS, DROP_MS_PER_LEVEL, LINE_SCORES, MIN_DROP_MS};

#[derive(Debug, Clone, Default)]
pub struct Scoring {
    score: u32,
    lines: u32,
    level: u32,
}

impl Scoring {
    pub fn new() -> Self {
        Self::default()
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
}

impl Scoreboard for Scoring {
    fn record_lines_cleared(&mut self, count: u32) {
        debug_assert!(count <= 4, "at most four rows fit one piece");
        self.lines += count;
        self.score += LINE_SCORES[count.min(4) as usize] * (self.level + 1);
        self.level = self.lines / 10;
    }

    fn drop_interval_ms(&self) -> u32 {
        BASE_DROP_MS
            .saturating_sub(self.level * DROP_MS_PER_LEVEL)
            .max(MIN_DROP_MS)
    }
}
