//! Grid level format
//!
//! One character per 32x32 cell, one line per row:
//! - `M`: player spawn
//! - `B`: brick
//! - `G`: ground / platform tile
//! - `E`: enemy spawn
//!
//! Anything else is empty space.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::TILE_SIZE;
use crate::sim::ActorKind;

/// Built-in level used by the headless driver
pub const DEMO_LEVEL: &str = "\
........................................
........................................
........................................
........................................
........................................
........................................
........................................
........................................
........................................
........................................
......BBB.................B.B...........
........................................
....M........E.........E..........GG....
...........GGG.............E............
GGGGGGGGGGGGGGGGGGGGGGGGG...GGGGGGGGGGGG";

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("level has no player spawn ('M')")]
    MissingSpawn,
}

/// Recognised level tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Player,
    Brick,
    Ground,
    Enemy,
}

impl Tile {
    pub fn from_token(token: char) -> Option<Self> {
        match token {
            'M' => Some(Tile::Player),
            'B' => Some(Tile::Brick),
            'G' => Some(Tile::Ground),
            'E' => Some(Tile::Enemy),
            _ => None,
        }
    }

    pub fn actor_kind(self) -> ActorKind {
        match self {
            Tile::Player => ActorKind::Player,
            Tile::Brick => ActorKind::Brick,
            Tile::Ground => ActorKind::Platform,
            Tile::Enemy => ActorKind::Enemy,
        }
    }
}

/// A non-empty cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub tile: Tile,
    pub row: usize,
    pub col: usize,
}

impl Cell {
    /// Top-left pixel position of the cell
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.col as f32 * TILE_SIZE, self.row as f32 * TILE_SIZE)
    }
}

/// A parsed level: the player spawn plus every other object, row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub player: Cell,
    pub cells: Vec<Cell>,
    pub rows: usize,
    pub cols: usize,
}

impl Level {
    /// Parse a level from text. Unknown tokens are treated as empty space;
    /// only the first `M` is used.
    pub fn parse(text: &str) -> Result<Self, LevelError> {
        let mut player = None;
        let mut cells = Vec::new();
        let mut rows = 0;
        let mut cols = 0;

        for (row, line) in text.lines().enumerate() {
            rows = row + 1;
            cols = cols.max(line.chars().count());

            for (col, token) in line.chars().enumerate() {
                let Some(tile) = Tile::from_token(token) else {
                    if !token.is_whitespace() && token != '.' {
                        log::trace!("Skipping unknown level token {token:?} at {row}:{col}");
                    }
                    continue;
                };
                let cell = Cell { tile, row, col };

                if tile == Tile::Player {
                    if player.is_none() {
                        player = Some(cell);
                    } else {
                        log::warn!("Ignoring extra player spawn at {row}:{col}");
                    }
                } else {
                    cells.push(cell);
                }
            }
        }

        let player = player.ok_or(LevelError::MissingSpawn)?;
        log::info!(
            "Parsed level {}x{} with {} objects",
            cols,
            rows,
            cells.len()
        );

        Ok(Self {
            player,
            cells,
            rows,
            cols,
        })
    }

    /// Read and parse a level file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Number of cells holding `tile`
    pub fn count(&self, tile: Tile) -> usize {
        if tile == Tile::Player {
            return 1;
        }
        self.cells.iter().filter(|c| c.tile == tile).count()
    }
}
