//! A* best-first search over 8-puzzle boards.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;

use heuristica_core::{HeuristicaError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::board::Board;
use crate::heuristic::manhattan_distance;
use crate::solver::{SearchOutcome, SearchResult, SearchStats, SearchTree, SolverConfig};

/// Entry in the A* frontier.
///
/// Frontier order is ascending `(f, h, seq)`: lowest `f = g + h` first,
/// then the lower heuristic, then the earlier insertion.
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    /// Board reached.
    board: Board,
    /// g(n): moves from the start.
    g: u32,
    /// h(n): Manhattan estimate to the goal.
    h: u32,
    /// Insertion sequence number.
    seq: u64,
}

impl SearchNode {
    fn f(&self) -> u32 {
        self.g + self.h
    }

    fn key(&self) -> (u32, u32, u64) {
        (self.f(), self.h, self.seq)
    }
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for SearchNode {}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (lowest key = highest priority)
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A frontier entry as seen from outside the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenEntry {
    pub board: Board,
    pub g: u32,
    pub h: u32,
}

impl OpenEntry {
    /// f(n) = g(n) + h(n).
    pub fn f(&self) -> u32 {
        self.g + self.h
    }
}

/// What a single call to [`SearchRun::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum SearchStep {
    /// A node was expanded and `pushed` successors entered the frontier.
    Expanded { board: Board, g: u32, h: u32, pushed: usize },
    /// A node was popped whose cost had since been improved.
    Stale { board: Board, g: u32 },
    /// The goal was popped.
    GoalReached { board: Board, g: u32 },
    /// The frontier is empty.
    Exhausted,
}

/// One in-progress search, advanced a node at a time.
#[derive(Debug)]
pub struct SearchRun {
    start: Board,
    frontier: BinaryHeap<SearchNode>,
    tree: SearchTree,
    stats: SearchStats,
    next_seq: u64,
    reached: Option<(Board, u32)>,
}

impl SearchRun {
    /// Start a search from `start`.
    pub fn new(start: Board) -> Self {
        let mut run = Self {
            start,
            frontier: BinaryHeap::new(),
            tree: SearchTree::rooted_at(start),
            stats: SearchStats::default(),
            next_seq: 0,
            reached: None,
        };
        run.push(start, 0);
        run
    }

    fn push(&mut self, board: Board, g: u32) {
        let node = SearchNode {
            board,
            g,
            h: manhattan_distance(&board),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.frontier.push(node);
        self.stats.pushed += 1;
        self.stats.max_frontier = self.stats.max_frontier.max(self.frontier.len());
    }

    /// Pop the best frontier node and process it.
    ///
    /// Once the goal has been reached every further call reports it again.
    pub fn step(&mut self) -> SearchStep {
        if let Some((board, g)) = self.reached {
            return SearchStep::GoalReached { board, g };
        }

        let current = match self.frontier.pop() {
            Some(node) => node,
            None => return SearchStep::Exhausted,
        };

        if current.board.is_goal() {
            self.reached = Some((current.board, current.g));
            return SearchStep::GoalReached {
                board: current.board,
                g: current.g,
            };
        }

        if self
            .tree
            .best_cost(&current.board)
            .is_some_and(|best| current.g > best)
        {
            self.stats.stale_discarded += 1;
            return SearchStep::Stale {
                board: current.board,
                g: current.g,
            };
        }

        self.stats.expanded += 1;
        let new_g = current.g + 1;
        let mut pushed = 0;
        for (mv, next) in current.board.neighbors() {
            if self.tree.relax(next, new_g, current.board, mv) {
                self.push(next, new_g);
                pushed += 1;
            }
        }

        SearchStep::Expanded {
            board: current.board,
            g: current.g,
            h: current.h,
            pushed,
        }
    }

    /// Whether the next [`SearchRun::step`] would expand a node, as opposed
    /// to reaching the goal, discarding a stale entry or finding the frontier
    /// empty.
    pub fn next_expands(&self) -> bool {
        if self.reached.is_some() {
            return false;
        }
        match self.frontier.peek() {
            Some(node) => {
                !node.board.is_goal()
                    && !self
                        .tree
                        .best_cost(&node.board)
                        .is_some_and(|best| node.g > best)
            }
            None => false,
        }
    }

    /// Board the search started from.
    pub fn start(&self) -> Board {
        self.start
    }

    /// Counters so far.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Costs and parents recorded so far.
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// Number of entries in the frontier, stale ones included.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Up to `limit` frontier entries in the order they would be popped.
    pub fn open_list(&self, limit: usize) -> Vec<OpenEntry> {
        let mut nodes = self.frontier.clone().into_sorted_vec();
        // Sorted ascending by `Ord`, so the next node to pop is last.
        nodes.reverse();
        nodes
            .into_iter()
            .take(limit)
            .map(|node| OpenEntry {
                board: node.board,
                g: node.g,
                h: node.h,
            })
            .collect()
    }

    /// Finish the run, packaging its tree and counters with `result`.
    pub fn into_outcome(self, result: SearchResult) -> SearchOutcome {
        SearchOutcome {
            result,
            tree: self.tree,
            stats: self.stats,
        }
    }
}

/// A* solver for the 8-puzzle, guided by Manhattan distance.
#[derive(Debug, Clone, Default)]
pub struct PuzzleSolver {
    config: SolverConfig,
}

impl PuzzleSolver {
    /// Create a new solver with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new solver with custom configuration.
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Get the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Update the solver configuration.
    pub fn set_config(&mut self, config: SolverConfig) {
        self.config = config;
    }

    /// Validate raw row-major tiles, then solve.
    pub fn solve_tiles(&self, tiles: &[u8]) -> Result<SearchOutcome> {
        let start = Board::new(tiles)?;
        self.solve(start)
    }

    /// Search from `start` to the goal.
    ///
    /// An empty frontier is reported as [`SearchResult::Unsolvable`]; only
    /// hitting the configured expansion ceiling is an error.
    pub fn solve(&self, start: Board) -> Result<SearchOutcome> {
        let start_time = Instant::now();
        info!(
            "Starting A* search from [{}] (h={})",
            start.inline(),
            manhattan_distance(&start)
        );

        let mut run = SearchRun::new(start);

        if self.config.parity_precheck && !start.is_solvable() {
            info!(
                "Start board has {} inversions, skipping search",
                start.inversions()
            );
            return Ok(run.into_outcome(SearchResult::Unsolvable));
        }

        loop {
            if let Some(limit) = self.config.max_expansions {
                let expanded = run.stats().expanded;
                if expanded >= limit && run.next_expands() {
                    warn!("A* reached max expansions limit ({})", limit);
                    return Err(HeuristicaError::SearchLimitExceeded { expanded, limit });
                }
            }

            match run.step() {
                SearchStep::Expanded { board, g, h, pushed } => {
                    debug!(
                        "Expanded [{}] f={} g={} h={}, pushed {}",
                        board.inline(),
                        g + h,
                        g,
                        h,
                        pushed
                    );
                }
                SearchStep::Stale { board, g } => {
                    debug!("Discarding stale entry [{}] g={}", board.inline(), g);
                }
                SearchStep::GoalReached { board, g } => {
                    let solution = run.tree().path_to(&board).ok_or_else(|| {
                        HeuristicaError::Internal(format!(
                            "goal reached at cost {} but parent chain is broken",
                            g
                        ))
                    })?;
                    info!(
                        "A* found solution with {} moves, expanded {} nodes in {}ms",
                        solution.move_count(),
                        run.stats().expanded,
                        start_time.elapsed().as_millis()
                    );
                    return Ok(run.into_outcome(SearchResult::Solved(solution)));
                }
                SearchStep::Exhausted => {
                    info!(
                        "A* exhausted {} reachable boards without reaching the goal",
                        run.tree().len()
                    );
                    return Ok(run.into_outcome(SearchResult::Unsolvable));
                }
            }
        }
    }
}
