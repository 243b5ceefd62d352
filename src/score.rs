//! Score counter
//!
//! Kills report a fixed increment; the total is capped and shown as a
//! zero-padded 9-digit string.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_SCORE;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score(u32);

impl Score {
    pub fn new() -> Self {
        Self(0)
    }

    /// Add points, saturating at the cap. Returns the points actually added.
    pub fn add(&mut self, points: u32) -> u32 {
        let before = self.0;
        self.0 = self.0.saturating_add(points).min(MAX_SCORE);
        self.0 - before
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }

    /// HUD text, e.g. `000000300`
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:09}", self.0)
    }
}
