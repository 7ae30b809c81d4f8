//! Plain-text rendering of solver and planner results.

use std::fmt;

use heuristica_planner::{PlanOutcome, PlanningProblem};
use heuristica_puzzle::Solution;

/// Move count followed by every board from start to goal.
pub struct SolutionReport<'a>(pub &'a Solution);

impl fmt::Display for SolutionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let solution = self.0;
        writeln!(f, "Solution found in {} moves.", solution.move_count())?;
        for (step, board) in solution.path.iter().enumerate() {
            writeln!(f)?;
            match step.checked_sub(1).and_then(|i| solution.moves.get(i)) {
                Some(mv) => writeln!(f, "Step {} ({}):", step, mv)?,
                None => writeln!(f, "Step {}:", step)?,
            }
            writeln!(f, "{}", board)?;
        }
        Ok(())
    }
}

/// Initial state, goals, planning trace and the numbered final plan.
pub struct PlanReport<'a> {
    pub problem: &'a PlanningProblem,
    pub outcome: &'a PlanOutcome,
}

impl fmt::Display for PlanReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "========= INITIAL STATE =========")?;
        for predicate in self.problem.initial().iter() {
            writeln!(f, "{}", predicate)?;
        }

        writeln!(f, "\n========= GOAL STATE =========")?;
        for goal in self.problem.goals() {
            writeln!(f, "{}", goal)?;
        }

        writeln!(f, "\n========= PLANNING PROCESS =========")?;
        for event in &self.outcome.trace {
            writeln!(f, "{}", event)?;
        }

        writeln!(f, "\n========= FINAL PLAN =========")?;
        for (index, action) in self.outcome.plan.iter().enumerate() {
            writeln!(f, "{}. {}", index + 1, action)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heuristica_planner::GoalStackPlanner;
    use heuristica_puzzle::{Board, PuzzleSolver};

    #[test]
    fn test_render_solution() {
        let start: Board = "1 2 3 4 0 6 7 5 8".parse().unwrap();
        let outcome = PuzzleSolver::new().solve(start).unwrap();
        let text = SolutionReport(outcome.solution().unwrap()).to_string();

        assert!(text.starts_with("Solution found in 2 moves.\n"));
        assert!(text.contains("Step 0:\n1 2 3\n4 _ 6\n7 5 8\n"));
        assert!(text.contains("Step 2 (RIGHT):\n1 2 3\n4 5 6\n7 8 _\n"));
    }

    #[test]
    fn test_render_plan_report() {
        let problem = PlanningProblem::sample();
        let outcome = GoalStackPlanner::new().plan(&problem).unwrap();
        let text = PlanReport {
            problem: &problem,
            outcome: &outcome,
        }
        .to_string();

        assert!(text.contains("Unsatisfied goals: [ON(A,B), ON(B,C)]"));
        assert!(text.contains("1. UNSTACK(B,A)\n"));
        assert!(text.ends_with("4. STACK(A,B)\n"));
    }
}
