use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::Position;

/// Represents errors that can occur while loading a map.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("failed to read map file: {0}")]
    Io(#[from] std::io::Error),
    #[error("map text is empty")]
    Empty,
    #[error("malformed header {line:?}: expected \"<width> <height>\"")]
    BadHeader { line: String },
    #[error("expected {expected} rows after the header, found {found}")]
    TooFewRows { expected: usize, found: usize },
    #[error("row {row} has {found} tiles, expected {expected}")]
    RowTooShort {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown tile character {ch:?} at ({x}, {y})")]
    UnknownTile { ch: char, x: usize, y: usize },
    #[error("map has no player start tile ('P')")]
    MissingPlayer,
}

/// The static terrain type of one grid cell.
///
/// The player is never stored as a tile; its position lives in the
/// environment state and is composed with the grid only when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Space,
    Wall,
    Coin,
    Trap,
    Goal,
}

impl Default for Tile {
    fn default() -> Self {
        Tile::Space
    }
}

impl Tile {
    /// The character this tile is written as in map files and rendering.
    pub fn to_char(self) -> char {
        match self {
            Tile::Space => '.',
            Tile::Wall => '#',
            Tile::Coin => 'C',
            Tile::Trap => 'X',
            Tile::Goal => 'G',
        }
    }
}

/// A rectangular grid of tiles.
///
/// Stores tiles in a flat vector using row-major order. Every row has
/// exactly `width` tiles and there are exactly `height` rows; the loader
/// rejects map text that cannot satisfy this. After loading, the only
/// mutation the grid sees is a collected coin turning into open space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    cells: Vec<Tile>,
}

impl TileGrid {
    pub(crate) fn from_rows(width: usize, height: usize, cells: Vec<Tile>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        TileGrid {
            width,
            height,
            cells,
        }
    }

    /// Returns the width of the grid.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height of the grid.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Checks if the given coordinates are within the grid boundaries.
    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Gets the tile at the given coordinates.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<Tile> {
        if self.in_bounds(x, y) {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Returns an iterator that yields `((x, y), tile)` for each cell in
    /// row-major order.
    pub fn enumerate(&self) -> impl Iterator<Item = ((usize, usize), Tile)> + '_ {
        self.cells.iter().enumerate().map(move |(index, tile)| {
            let y = index / self.width;
            let x = index % self.width;
            ((x, y), *tile)
        })
    }
}

/// Indexing by position for immutable access.
impl Index<Position> for TileGrid {
    type Output = Tile;

    #[inline]
    fn index(&self, pos: Position) -> &Self::Output {
        match self.in_bounds(pos.x, pos.y) {
            true => &self.cells[pos.y * self.width + pos.x],
            false => panic!(
                "Grid index ({}, {}) out of bounds for grid size ({}, {})",
                pos.x, pos.y, self.width, self.height
            ),
        }
    }
}

/// Indexing by position for mutable access.
impl IndexMut<Position> for TileGrid {
    #[inline]
    fn index_mut(&mut self, pos: Position) -> &mut Self::Output {
        let (width, height) = (self.width, self.height);
        match self.in_bounds(pos.x, pos.y) {
            true => &mut self.cells[pos.y * width + pos.x],
            false => panic!(
                "Grid index ({}, {}) out of bounds for grid size ({}, {})",
                pos.x, pos.y, width, height
            ),
        }
    }
}
