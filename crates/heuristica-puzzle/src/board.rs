//! Board representation for the 8-puzzle.
//!
//! A board is a row-major arrangement of nine cells holding the tiles
//! 0 through 8, where 0 is the blank. Boards are immutable values; every
//! move produces a new board with the blank swapped into a neighbouring cell.

use std::fmt;
use std::str::FromStr;

use heuristica_core::{HeuristicaError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Width and height of the board.
pub const SIDE: usize = 3;

/// Number of cells on the board.
pub const CELLS: usize = SIDE * SIDE;

const GOAL_TILES: [u8; CELLS] = [1, 2, 3, 4, 5, 6, 7, 8, 0];

/// Direction the blank travels when a move is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All moves, in the order successors are generated.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Row and column offset applied to the blank.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Up => "UP",
            Move::Down => "DOWN",
            Move::Left => "LEFT",
            Move::Right => "RIGHT",
        };
        f.write_str(name)
    }
}

/// A validated 8-puzzle board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Board {
    tiles: [u8; CELLS],
    blank: u8,
}

impl Board {
    /// Create a board from row-major tiles.
    ///
    /// Rejects anything other than nine distinct values in `0..=8`.
    pub fn new(tiles: &[u8]) -> Result<Self> {
        if tiles.len() != CELLS {
            return Err(HeuristicaError::invalid_board(format!(
                "expected {} tiles, got {}",
                CELLS,
                tiles.len()
            )));
        }

        let mut seen = [false; CELLS];
        let mut cells = [0u8; CELLS];
        let mut blank = 0u8;
        for (index, &tile) in tiles.iter().enumerate() {
            let slot = usize::from(tile);
            if slot >= CELLS {
                return Err(HeuristicaError::invalid_board(format!(
                    "tile {} at position {} is outside 0..={}",
                    tile,
                    index,
                    CELLS - 1
                )));
            }
            if seen[slot] {
                return Err(HeuristicaError::invalid_board(format!(
                    "tile {} appears more than once",
                    tile
                )));
            }
            seen[slot] = true;
            cells[index] = tile;
            if tile == 0 {
                blank = index as u8;
            }
        }

        Ok(Self {
            tiles: cells,
            blank,
        })
    }

    /// The canonical goal: tiles 1-8 in row-major order, blank last.
    pub fn goal() -> Self {
        Self {
            tiles: GOAL_TILES,
            blank: (CELLS - 1) as u8,
        }
    }

    /// Draw a uniformly shuffled board, retrying until it is solvable.
    pub fn random_solvable<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut tiles = GOAL_TILES;
        loop {
            tiles.shuffle(rng);
            let blank = tiles.iter().position(|&t| t == 0).unwrap_or(CELLS - 1) as u8;
            let board = Self { tiles, blank };
            if board.is_solvable() {
                return board;
            }
        }
    }

    /// Row-major tiles.
    pub fn tiles(&self) -> &[u8; CELLS] {
        &self.tiles
    }

    /// Tiles on one line, space separated, 0 for the blank. Used in logs.
    pub fn inline(&self) -> String {
        self.tiles
            .iter()
            .map(|tile| tile.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Tile at the given row and column.
    pub fn tile_at(&self, row: usize, col: usize) -> u8 {
        self.tiles[row * SIDE + col]
    }

    /// Index of the blank cell.
    pub fn blank_index(&self) -> usize {
        usize::from(self.blank)
    }

    /// Whether this board is the goal arrangement.
    pub fn is_goal(&self) -> bool {
        self.tiles == GOAL_TILES
    }

    /// Slide the blank one cell, if the move stays on the board.
    pub fn apply(&self, mv: Move) -> Option<Board> {
        let blank = self.blank_index();
        let (row, col) = ((blank / SIDE) as isize, (blank % SIDE) as isize);
        let (dr, dc) = mv.delta();
        let (nr, nc) = (row + dr, col + dc);
        if nr < 0 || nc < 0 || nr >= SIDE as isize || nc >= SIDE as isize {
            return None;
        }

        let target = nr as usize * SIDE + nc as usize;
        let mut tiles = self.tiles;
        tiles.swap(blank, target);
        Some(Board {
            tiles,
            blank: target as u8,
        })
    }

    /// Successor boards, produced by swapping the blank with each
    /// orthogonally adjacent cell. Yields between two and four boards.
    pub fn neighbors(self) -> impl Iterator<Item = (Move, Board)> {
        Move::ALL
            .into_iter()
            .filter_map(move |mv| self.apply(mv).map(|next| (mv, next)))
    }

    /// Whether `other` is reachable from this board in a single move.
    pub fn is_adjacent_to(&self, other: &Board) -> bool {
        self.neighbors().any(|(_, next)| next == *other)
    }

    /// Number of tile pairs out of goal order, ignoring the blank.
    pub fn inversions(&self) -> usize {
        let tiles: Vec<u8> = self.tiles.iter().copied().filter(|&t| t != 0).collect();
        let mut count = 0;
        for (i, &a) in tiles.iter().enumerate() {
            count += tiles[i + 1..].iter().filter(|&&b| a > b).count();
        }
        count
    }

    /// Whether the goal is reachable from this board.
    ///
    /// On an odd-width board a move never changes inversion parity, and the
    /// goal has zero inversions.
    pub fn is_solvable(&self) -> bool {
        self.inversions() % 2 == 0
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::goal()
    }
}

impl TryFrom<Vec<u8>> for Board {
    type Error = HeuristicaError;

    fn try_from(tiles: Vec<u8>) -> Result<Self> {
        Board::new(&tiles)
    }
}

impl From<Board> for Vec<u8> {
    fn from(board: Board) -> Self {
        board.tiles.to_vec()
    }
}

impl FromStr for Board {
    type Err = HeuristicaError;

    /// Parse nine tile values separated by whitespace and/or commas.
    fn from_str(s: &str) -> Result<Self> {
        let tiles = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .map(|token| {
                token.parse::<u8>().map_err(|_| {
                    HeuristicaError::invalid_board(format!("'{}' is not a tile value", token))
                })
            })
            .collect::<Result<Vec<u8>>>()?;
        Board::new(&tiles)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIDE {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..SIDE {
                if col > 0 {
                    f.write_str(" ")?;
                }
                match self.tile_at(row, col) {
                    0 => f.write_str("_")?,
                    tile => write!(f, "{}", tile)?,
                }
            }
        }
        Ok(())
    }
}
