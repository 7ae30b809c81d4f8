//! Solver configuration and search results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Move};

/// Configuration for the puzzle solver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Maximum number of node expansions before giving up (`None` = unbounded).
    pub max_expansions: Option<usize>,

    /// Report odd-parity boards as unsolvable without searching.
    pub parity_precheck: bool,
}

impl SolverConfig {
    /// Set the expansion ceiling.
    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    /// Enable or disable the parity precheck.
    pub fn with_parity_precheck(mut self, enabled: bool) -> Self {
        self.parity_precheck = enabled;
        self
    }
}

/// A path from the start board to the goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// Boards from start to goal, inclusive.
    pub path: Vec<Board>,

    /// Moves of the blank; `moves[i]` turns `path[i]` into `path[i + 1]`.
    pub moves: Vec<Move>,
}

impl Solution {
    /// Number of moves in the solution.
    pub fn move_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// The first board of the path.
    pub fn start(&self) -> Option<&Board> {
        self.path.first()
    }

    /// The last board of the path.
    pub fn end(&self) -> Option<&Board> {
        self.path.last()
    }
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Nodes popped and expanded.
    pub expanded: usize,

    /// Frontier entries discarded because a cheaper path was already known.
    pub stale_discarded: usize,

    /// Frontier entries pushed, including the start.
    pub pushed: usize,

    /// Largest frontier size observed.
    pub max_frontier: usize,
}

/// Terminal result of a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchResult {
    /// The goal was reached.
    Solved(Solution),
    /// The frontier emptied without reaching the goal.
    Unsolvable,
}

/// Best known costs and parents of every board the search has reached.
///
/// A board's cost is only ever lowered, and its parent always changes
/// together with its cost.
#[derive(Debug, Clone, Default)]
pub struct SearchTree {
    best_cost: HashMap<Board, u32>,
    parent: HashMap<Board, Option<(Board, Move)>>,
}

impl SearchTree {
    /// Tree rooted at `start`, which has cost zero and no parent.
    pub fn rooted_at(start: Board) -> Self {
        let mut tree = Self::default();
        tree.best_cost.insert(start, 0);
        tree.parent.insert(start, None);
        tree
    }

    /// Record a path to `board` of cost `g` through `parent`.
    ///
    /// Returns `true` if `g` improves on the known cost (or the board is new).
    pub fn relax(&mut self, board: Board, g: u32, parent: Board, mv: Move) -> bool {
        match self.best_cost.get(&board) {
            Some(&best) if best <= g => false,
            _ => {
                self.best_cost.insert(board, g);
                self.parent.insert(board, Some((parent, mv)));
                true
            }
        }
    }

    /// Lowest known cost to reach `board`.
    pub fn best_cost(&self, board: &Board) -> Option<u32> {
        self.best_cost.get(board).copied()
    }

    /// Predecessor of `board` on its best known path (`None` for the root
    /// and for unknown boards).
    pub fn parent(&self, board: &Board) -> Option<Board> {
        self.parent
            .get(board)
            .and_then(|entry| entry.map(|(parent, _)| parent))
    }

    /// Whether the search has reached `board`.
    pub fn contains(&self, board: &Board) -> bool {
        self.best_cost.contains_key(board)
    }

    /// Number of boards reached.
    pub fn len(&self) -> usize {
        self.best_cost.len()
    }

    /// Whether no board has been reached.
    pub fn is_empty(&self) -> bool {
        self.best_cost.is_empty()
    }

    /// Boards reached, with their best known cost.
    pub fn iter(&self) -> impl Iterator<Item = (&Board, u32)> + '_ {
        self.best_cost.iter().map(|(board, &g)| (board, g))
    }

    /// Follow parent links from `board` back to the root.
    ///
    /// Returns `None` if `board` was never reached.
    pub fn path_to(&self, board: &Board) -> Option<Solution> {
        let mut path = vec![*board];
        let mut moves = Vec::new();
        let mut current = *board;

        loop {
            match self.parent.get(&current)? {
                None => break,
                Some((parent, mv)) => {
                    // Parent links cannot cycle while costs only decrease.
                    if path.len() > self.parent.len() {
                        return None;
                    }
                    path.push(*parent);
                    moves.push(*mv);
                    current = *parent;
                }
            }
        }

        path.reverse();
        moves.reverse();
        Some(Solution { path, moves })
    }
}

/// Everything a finished search produced.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Solved or unsolvable.
    pub result: SearchResult,

    /// Costs and parents recorded during the search.
    pub tree: SearchTree,

    /// Search counters.
    pub stats: SearchStats,
}

impl SearchOutcome {
    /// The solution, if one was found.
    pub fn solution(&self) -> Option<&Solution> {
        match &self.result {
            SearchResult::Solved(solution) => Some(solution),
            SearchResult::Unsolvable => None,
        }
    }

    /// Whether the goal was reached.
    pub fn is_solved(&self) -> bool {
        matches!(self.result, SearchResult::Solved(_))
    }
}
