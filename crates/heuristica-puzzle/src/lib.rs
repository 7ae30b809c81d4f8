//! # Heuristica Puzzle
//!
//! A* best-first search over 8-puzzle boards.
//!
//! - [`Board`] - Validated 3x3 tile arrangement
//! - [`PuzzleSolver`] - Manhattan-guided best-first solver
//! - [`SearchRun`] - Stepwise view of a single search

pub mod astar;
pub mod board;
pub mod heuristic;
pub mod solver;

pub use astar::{OpenEntry, PuzzleSolver, SearchRun, SearchStep};
pub use board::{Board, Move};
pub use heuristic::{manhattan_distance, misplaced_tiles};
pub use solver::{SearchOutcome, SearchResult, SearchStats, SearchTree, Solution, SolverConfig};
