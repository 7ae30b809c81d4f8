//! Goal-stack planner implementation.
//!
//! Goals are pushed onto a stack and resolved last-in-first-out. An unmet
//! goal selects an action; if that action is not yet applicable the goal is
//! re-pushed beneath the missing preconditions so they are resolved first.
//!
//! Action selection is deliberately naive: its fallbacks can pick actions
//! whose preconditions are unreachable, so the stack may grow forever.
//! [`GoalStackPlanner::plan`] bounds iterations and stack depth and reports
//! [`HeuristicaError::PlanningDidNotConverge`] instead of looping.

use heuristica_core::{HeuristicaError, Result};
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::planner::{GoalEntry, PlanEvent, PlanOutcome, PlannerConfig};
use crate::predicate::{Block, Predicate};
use crate::problem::PlanningProblem;
use crate::state::WorldState;

/// Pick the action used to achieve an unmet `goal` in `state`.
///
/// `blocks` is scanned in order when a supporting block must be found.
pub fn choose_action(goal: &Predicate, state: &WorldState, blocks: &[Block]) -> Action {
    match goal {
        Predicate::On(x, y) => Action::Stack(x.clone(), y.clone()),
        Predicate::OnTable(x) => Action::Putdown(x.clone()),
        Predicate::Clear(x) => blocks
            .iter()
            .find(|b| state.holds(&Predicate::on(b.as_str(), x.as_str())))
            .map(|b| Action::Unstack(b.clone(), x.clone()))
            .unwrap_or_else(|| Action::Putdown(x.clone())),
        Predicate::Holding(x) => {
            if state.holds(&Predicate::on_table(x.as_str())) {
                return Action::Pickup(x.clone());
            }
            blocks
                .iter()
                .find(|b| state.holds(&Predicate::on(x.as_str(), b.as_str())))
                .map(|b| Action::Unstack(x.clone(), b.clone()))
                .unwrap_or_else(|| Action::Pickup(x.clone()))
        }
        Predicate::ArmEmpty => {
            let held = blocks
                .iter()
                .find(|b| state.holds(&Predicate::holding(b.as_str())))
                .or_else(|| blocks.first());
            // Without a held block this puts down an arbitrary block, which
            // may never become applicable.
            Action::Putdown(held.cloned().unwrap_or_default())
        }
    }
}

/// One in-progress planning run, advanced a stack pop at a time.
#[derive(Debug, Clone)]
pub struct PlannerRun<'a> {
    problem: &'a PlanningProblem,
    state: WorldState,
    stack: Vec<GoalEntry>,
    plan: Vec<Action>,
    iterations: usize,
}

impl<'a> PlannerRun<'a> {
    /// Start a run with the full goal conjunction on the stack.
    pub fn new(problem: &'a PlanningProblem) -> Self {
        let mut stack = Vec::new();
        if !problem.goals().is_empty() {
            stack.push(GoalEntry::from_goals(problem.goals().to_vec()));
        }
        Self {
            problem,
            state: problem.initial().clone(),
            stack,
            plan: Vec::new(),
            iterations: 0,
        }
    }

    /// Pop the top of the goal stack and process it.
    pub fn step(&mut self) -> PlanEvent {
        let top = match self.stack.pop() {
            Some(entry) => entry,
            None => return PlanEvent::Complete,
        };
        self.iterations += 1;

        match top {
            GoalEntry::Conjunction(conjunction) => {
                let unsatisfied = self.state.unmet(&conjunction);
                if unsatisfied.is_empty() {
                    return PlanEvent::ConjunctionSatisfied { conjunction };
                }

                self.stack.push(GoalEntry::Conjunction(conjunction.clone()));
                self.stack
                    .extend(unsatisfied.iter().cloned().map(GoalEntry::Single));
                PlanEvent::UnsatisfiedGoals {
                    conjunction,
                    unsatisfied,
                }
            }
            GoalEntry::Single(goal) => {
                if self.state.holds(&goal) {
                    return PlanEvent::GoalSatisfied { goal };
                }

                let action = choose_action(&goal, &self.state, self.problem.blocks());
                let missing = self.state.unmet(&action.preconditions());
                if !missing.is_empty() {
                    self.stack.push(GoalEntry::Single(goal.clone()));
                    self.stack.extend(missing.iter().cloned().map(GoalEntry::Single));
                    return PlanEvent::PreconditionsPending {
                        goal,
                        action,
                        missing,
                    };
                }

                self.state.apply(&action);
                self.plan.push(action.clone());
                PlanEvent::ActionApplied {
                    goal,
                    action,
                    state: self.state.clone(),
                }
            }
        }
    }

    /// Whether the goal stack is empty.
    pub fn is_complete(&self) -> bool {
        self.stack.is_empty()
    }

    /// Pending entries, bottom first.
    pub fn stack(&self) -> &[GoalEntry] {
        &self.stack
    }

    /// Current goal-stack depth.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Current world state.
    pub fn state(&self) -> &WorldState {
        &self.state
    }

    /// Actions applied so far.
    pub fn plan(&self) -> &[Action] {
        &self.plan
    }

    /// Number of stack pops so far.
    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

/// Goal-stack planner for the blocks world.
#[derive(Debug, Clone, Default)]
pub struct GoalStackPlanner {
    config: PlannerConfig,
}

impl GoalStackPlanner {
    /// Create a new planner with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new planner with custom configuration.
    pub fn with_config(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// Get the planner configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Update the planner configuration.
    pub fn set_config(&mut self, config: PlannerConfig) {
        self.config = config;
    }

    /// Run the goal stack to empty and return the accumulated plan.
    pub fn plan(&self, problem: &PlanningProblem) -> Result<PlanOutcome> {
        info!(
            "Starting goal-stack planning for {} goals over {} blocks",
            problem.goals().len(),
            problem.blocks().len()
        );

        let mut run = PlannerRun::new(problem);
        let mut trace = Vec::new();

        while !run.is_complete() {
            if run.iterations() >= self.config.max_iterations {
                warn!(
                    "Goal-stack planner exceeded max iterations ({})",
                    self.config.max_iterations
                );
                return Err(HeuristicaError::PlanningDidNotConverge {
                    iterations: run.iterations(),
                    stack_depth: run.stack_depth(),
                    message: format!(
                        "iteration ceiling of {} reached",
                        self.config.max_iterations
                    ),
                });
            }

            if let Some(top) = run.stack().last() {
                debug!("Resolving {}", top);
            }
            let event = run.step();
            debug!("{}", event);
            if self.config.record_trace {
                trace.push(event);
            }

            if run.stack_depth() > self.config.max_stack_depth {
                warn!(
                    "Goal-stack planner exceeded max stack depth ({})",
                    self.config.max_stack_depth
                );
                return Err(HeuristicaError::PlanningDidNotConverge {
                    iterations: run.iterations(),
                    stack_depth: run.stack_depth(),
                    message: format!(
                        "stack depth ceiling of {} reached",
                        self.config.max_stack_depth
                    ),
                });
            }
        }

        if self.config.record_trace {
            trace.push(PlanEvent::Complete);
        }

        let plan = run.plan().to_vec();
        info!(
            "Goal-stack planner found plan with {} actions in {} iterations",
            plan.len(),
            run.iterations()
        );

        Ok(PlanOutcome {
            plan,
            trace,
            final_state: run.state().clone(),
            iterations: run.iterations(),
        })
    }

    /// Replay `plan` from the problem's initial state.
    ///
    /// Returns `false` if an action is not applicable when reached or if
    /// any goal fails to hold afterwards.
    pub fn validate_plan(&self, problem: &PlanningProblem, plan: &[Action]) -> bool {
        let mut state = problem.initial().clone();

        for action in plan {
            if !state.is_applicable(action) {
                debug!("Plan validation failed at {}", action);
                return false;
            }
            state.apply(action);
        }

        problem.is_satisfied_by(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks() -> Vec<Block> {
        vec!["A".into(), "B".into(), "C".into()]
    }

    #[test]
    fn test_choose_action_on_and_ontable() {
        let state = WorldState::default();
        assert_eq!(
            choose_action(&Predicate::on("A", "B"), &state, &blocks()),
            Action::Stack("A".into(), "B".into())
        );
        assert_eq!(
            choose_action(&Predicate::on_table("A"), &state, &blocks()),
            Action::Putdown("A".into())
        );
    }

    #[test]
    fn test_choose_action_clear() {
        let covered = WorldState::new([Predicate::on("C", "A")]);
        assert_eq!(
            choose_action(&Predicate::clear("A"), &covered, &blocks()),
            Action::Unstack("C".into(), "A".into())
        );
        assert_eq!(
            choose_action(&Predicate::clear("A"), &WorldState::default(), &blocks()),
            Action::Putdown("A".into())
        );
    }

    #[test]
    fn test_choose_action_holding() {
        let on_table = WorldState::new([Predicate::on_table("B")]);
        assert_eq!(
            choose_action(&Predicate::holding("B"), &on_table, &blocks()),
            Action::Pickup("B".into())
        );

        let stacked = WorldState::new([Predicate::on("B", "C")]);
        assert_eq!(
            choose_action(&Predicate::holding("B"), &stacked, &blocks()),
            Action::Unstack("B".into(), "C".into())
        );

        assert_eq!(
            choose_action(&Predicate::holding("B"), &WorldState::default(), &blocks()),
            Action::Pickup("B".into())
        );
    }

    #[test]
    fn test_choose_action_arm_empty() {
        let holding = WorldState::new([Predicate::holding("C")]);
        assert_eq!(
            choose_action(&Predicate::arm_empty(), &holding, &blocks()),
            Action::Putdown("C".into())
        );
        assert_eq!(
            choose_action(&Predicate::arm_empty(), &WorldState::default(), &blocks()),
            Action::Putdown("A".into())
        );
    }

    #[test]
    fn test_sample_plan() {
        let problem = PlanningProblem::sample();
        let planner = GoalStackPlanner::new();
        let outcome = planner.plan(&problem).unwrap();

        assert_eq!(
            outcome.plan,
            vec![
                Action::Unstack("B".into(), "A".into()),
                Action::Stack("B".into(), "C".into()),
                Action::Pickup("A".into()),
                Action::Stack("A".into(), "B".into()),
            ]
        );
        assert!(problem.is_satisfied_by(&outcome.final_state));
        assert!(planner.validate_plan(&problem, &outcome.plan));
    }

    #[test]
    fn test_sample_trace() {
        let outcome = GoalStackPlanner::new()
            .plan(&PlanningProblem::sample())
            .unwrap();

        assert_eq!(
            outcome.trace.first(),
            Some(&PlanEvent::UnsatisfiedGoals {
                conjunction: PlanningProblem::sample().goals().to_vec(),
                unsatisfied: vec![Predicate::on("A", "B"), Predicate::on("B", "C")],
            })
        );
        assert_eq!(outcome.trace.last(), Some(&PlanEvent::Complete));

        let applied = outcome
            .trace
            .iter()
            .filter(|e| matches!(e, PlanEvent::ActionApplied { .. }))
            .count();
        assert_eq!(applied, outcome.plan.len());
        assert_eq!(outcome.trace.len(), outcome.iterations + 1);
    }

    #[test]
    fn test_goal_already_satisfied() {
        let problem = PlanningProblem::new(
            ["A"],
            [Predicate::on_table("A"), Predicate::clear("A"), Predicate::arm_empty()],
            [Predicate::on_table("A")],
        )
        .unwrap();
        let outcome = GoalStackPlanner::new().plan(&problem).unwrap();
        assert!(outcome.plan.is_empty());
        assert_eq!(
            outcome.trace,
            vec![
                PlanEvent::GoalSatisfied {
                    goal: Predicate::on_table("A")
                },
                PlanEvent::Complete
            ]
        );
    }

    #[test]
    fn test_empty_goal_list() {
        let problem =
            PlanningProblem::new(["A"], [Predicate::arm_empty()], Vec::<Predicate>::new()).unwrap();
        let outcome = GoalStackPlanner::new().plan(&problem).unwrap();
        assert!(outcome.plan.is_empty());
        assert_eq!(outcome.iterations, 0);
    }

    #[test]
    fn test_arm_empty_fallback_does_not_converge() {
        // Nothing is held and ARMEMPTY is false, so the fallback PUTDOWN(A)
        // needs HOLDING(A), whose PICKUP(A) needs ARMEMPTY again.
        let problem = PlanningProblem::new(
            ["A"],
            [Predicate::on_table("A"), Predicate::clear("A")],
            [Predicate::arm_empty()],
        )
        .unwrap();

        let err = GoalStackPlanner::new().plan(&problem).unwrap_err();
        match err {
            HeuristicaError::PlanningDidNotConverge { stack_depth, .. } => {
                assert_eq!(stack_depth, 257);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_iteration_ceiling() {
        let problem = PlanningProblem::new(
            ["A"],
            [Predicate::on_table("A"), Predicate::clear("A")],
            [Predicate::arm_empty()],
        )
        .unwrap();
        let planner = GoalStackPlanner::with_config(PlannerConfig {
            max_iterations: 50,
            max_stack_depth: usize::MAX,
            record_trace: false,
        });

        let err = planner.plan(&problem).unwrap_err();
        assert!(err.is_recoverable());
        assert!(matches!(
            err,
            HeuristicaError::PlanningDidNotConverge { iterations: 50, .. }
        ));
    }

    #[test]
    fn test_validate_rejects_inapplicable_plan() {
        let problem = PlanningProblem::sample();
        let planner = GoalStackPlanner::new();
        assert!(!planner.validate_plan(&problem, &[Action::Pickup("A".into())]));
        assert!(!planner.validate_plan(&problem, &[]));
    }

    #[test]
    fn test_run_step_by_step() {
        let problem = PlanningProblem::sample();
        let mut run = PlannerRun::new(&problem);
        assert_eq!(run.stack_depth(), 1);

        run.step();
        // Conjunction re-pushed beneath ON(A,B) and ON(B,C).
        assert_eq!(run.stack_depth(), 3);
        assert_eq!(
            run.stack().last(),
            Some(&GoalEntry::Single(Predicate::on("B", "C")))
        );

        while !run.is_complete() {
            run.step();
        }
        assert_eq!(run.plan().len(), 4);
        assert_eq!(run.step(), PlanEvent::Complete);
    }
}
