//! # Heuristica Planner
//!
//! STRIPS-style goal-stack planning for the blocks world.

pub mod action;
pub mod goal_stack;
pub mod planner;
pub mod predicate;
pub mod problem;
pub mod state;

pub use action::Action;
pub use goal_stack::{choose_action, GoalStackPlanner, PlannerRun};
pub use planner::{GoalEntry, PlanEvent, PlanOutcome, PlannerConfig};
pub use predicate::{Block, Predicate};
pub use problem::PlanningProblem;
pub use state::WorldState;
