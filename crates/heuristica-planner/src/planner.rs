//! Planner configuration, goal-stack entries and planning results.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::predicate::{display_list, Predicate};
use crate::state::WorldState;

/// Configuration for the goal-stack planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Maximum number of goal-stack pops before giving up.
    pub max_iterations: usize,

    /// Maximum goal-stack depth before giving up.
    pub max_stack_depth: usize,

    /// Keep every [`PlanEvent`] in the outcome.
    pub record_trace: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            max_stack_depth: 256,
            record_trace: true,
        }
    }
}

/// An entry on the goal stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalEntry {
    /// Several goals that must hold at the same time.
    Conjunction(Vec<Predicate>),
    /// A single goal.
    Single(Predicate),
}

impl GoalEntry {
    /// A conjunction, or a single goal when only one predicate is given.
    pub fn from_goals(mut goals: Vec<Predicate>) -> Self {
        if goals.len() == 1 {
            if let Some(goal) = goals.pop() {
                return GoalEntry::Single(goal);
            }
        }
        GoalEntry::Conjunction(goals)
    }
}

impl fmt::Display for GoalEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalEntry::Conjunction(goals) => write!(f, "all of {}", display_list(goals)),
            GoalEntry::Single(goal) => write!(f, "{}", goal),
        }
    }
}

/// What one pop of the goal stack did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlanEvent {
    /// A conjunction had false members; it was re-pushed beneath them.
    UnsatisfiedGoals {
        conjunction: Vec<Predicate>,
        unsatisfied: Vec<Predicate>,
    },
    /// Every member of a conjunction held; it was discarded.
    ConjunctionSatisfied { conjunction: Vec<Predicate> },
    /// A single goal already held; it was discarded.
    GoalSatisfied { goal: Predicate },
    /// The chosen action was not applicable; the goal was re-pushed beneath
    /// the missing preconditions.
    PreconditionsPending {
        goal: Predicate,
        action: Action,
        missing: Vec<Predicate>,
    },
    /// The chosen action was applied and appended to the plan.
    ActionApplied {
        goal: Predicate,
        action: Action,
        state: WorldState,
    },
    /// The goal stack is empty.
    Complete,
}

impl fmt::Display for PlanEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanEvent::UnsatisfiedGoals { unsatisfied, .. } => {
                write!(f, "Unsatisfied goals: {}", display_list(unsatisfied))
            }
            PlanEvent::ConjunctionSatisfied { conjunction } => {
                write!(f, "All goals satisfied: {}", display_list(conjunction))
            }
            PlanEvent::GoalSatisfied { goal } => write!(f, "Goal {} already satisfied", goal),
            PlanEvent::PreconditionsPending {
                goal,
                action,
                missing,
            } => write!(
                f,
                "Selected {} for {}; needs {}",
                action,
                goal,
                display_list(missing)
            ),
            PlanEvent::ActionApplied { action, state, .. } => {
                write!(f, "Executing {}; state {}", action, state)
            }
            PlanEvent::Complete => f.write_str("Goal stack empty"),
        }
    }
}

/// The result of a converged planning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOutcome {
    /// Actions in the order they were applied.
    pub plan: Vec<Action>,

    /// Every event, if tracing was enabled.
    pub trace: Vec<PlanEvent>,

    /// World state after the last action.
    pub final_state: WorldState,

    /// Number of goal-stack pops.
    pub iterations: usize,
}
