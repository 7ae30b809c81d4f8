//! Planning problem definition.

use heuristica_core::{HeuristicaError, Result};
use serde::{Deserialize, Serialize};

use crate::predicate::{Block, Predicate};
use crate::state::WorldState;

/// Blocks, initial state and goal conjunction for one planning run.
///
/// Deserialised problems go through the same validation as [`PlanningProblem::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProblem", into = "RawProblem")]
pub struct PlanningProblem {
    blocks: Vec<Block>,
    initial: WorldState,
    goals: Vec<Predicate>,
}

/// Unvalidated wire form of a [`PlanningProblem`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawProblem {
    blocks: Vec<Block>,
    initial: Vec<Predicate>,
    goals: Vec<Predicate>,
}

impl TryFrom<RawProblem> for PlanningProblem {
    type Error = HeuristicaError;

    fn try_from(raw: RawProblem) -> Result<Self> {
        PlanningProblem::new(raw.blocks, raw.initial, raw.goals)
    }
}

impl From<PlanningProblem> for RawProblem {
    fn from(problem: PlanningProblem) -> Self {
        RawProblem {
            blocks: problem.blocks,
            initial: problem.initial.iter().cloned().collect(),
            goals: problem.goals,
        }
    }
}

impl PlanningProblem {
    /// Create a problem, checking that the block list is non-empty and that
    /// every predicate names only listed blocks.
    pub fn new(
        blocks: impl IntoIterator<Item = impl Into<Block>>,
        initial: impl IntoIterator<Item = Predicate>,
        goals: impl IntoIterator<Item = Predicate>,
    ) -> Result<Self> {
        let problem = Self {
            blocks: blocks.into_iter().map(Into::into).collect(),
            initial: WorldState::new(initial),
            goals: goals.into_iter().collect(),
        };
        problem.validate()?;
        Ok(problem)
    }

    /// Parse a problem from JSON of the form
    /// `{"blocks": [..], "initial": [..], "goals": [..]}`.
    ///
    /// Malformed JSON is a [`HeuristicaError::SerializationError`]; a
    /// well-formed problem that fails validation is an
    /// [`HeuristicaError::InvalidProblem`].
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawProblem = serde_json::from_str(json)?;
        raw.try_into()
    }

    /// The three-block scenario: B sits on A, C is alone, and the goal is
    /// the tower A on B on C.
    pub fn sample() -> Self {
        Self {
            blocks: vec!["A".into(), "B".into(), "C".into()],
            initial: WorldState::new([
                Predicate::on_table("A"),
                Predicate::on("B", "A"),
                Predicate::on_table("C"),
                Predicate::clear("B"),
                Predicate::clear("C"),
                Predicate::arm_empty(),
            ]),
            goals: vec![
                Predicate::on("A", "B"),
                Predicate::on("B", "C"),
                Predicate::on_table("C"),
                Predicate::arm_empty(),
            ],
        }
    }

    fn validate(&self) -> Result<()> {
        if self.blocks.is_empty() {
            return Err(HeuristicaError::invalid_problem("block list is empty"));
        }

        for predicate in self.initial.iter().chain(&self.goals) {
            if let Some(unknown) = predicate
                .blocks()
                .into_iter()
                .find(|name| !self.blocks.iter().any(|b| b == name))
            {
                return Err(HeuristicaError::invalid_problem(format!(
                    "{} names unknown block {}",
                    predicate, unknown
                )));
            }
        }
        Ok(())
    }

    /// Known block names, in the order the planner scans them.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The starting world state.
    pub fn initial(&self) -> &WorldState {
        &self.initial
    }

    /// Goal predicates, to be achieved together.
    pub fn goals(&self) -> &[Predicate] {
        &self.goals
    }

    /// Whether every goal holds in `state`.
    pub fn is_satisfied_by(&self, state: &WorldState) -> bool {
        state.holds_all(&self.goals)
    }
}
