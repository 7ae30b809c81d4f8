//! Blocks-world action templates.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::predicate::{Block, Predicate};

/// A grounded blocks-world operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Lift a clear block off the table.
    Pickup(Block),
    /// Lower the held block onto the table.
    Putdown(Block),
    /// Lift the first block off the second.
    Unstack(Block, Block),
    /// Place the held first block onto the second.
    Stack(Block, Block),
}

impl Action {
    /// Upper-case operator name.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Pickup(_) => "PICKUP",
            Action::Putdown(_) => "PUTDOWN",
            Action::Unstack(..) => "UNSTACK",
            Action::Stack(..) => "STACK",
        }
    }

    /// Predicates that must hold before the action can be applied.
    pub fn preconditions(&self) -> Vec<Predicate> {
        match self {
            Action::Pickup(x) => vec![
                Predicate::on_table(x.as_str()),
                Predicate::clear(x.as_str()),
                Predicate::ArmEmpty,
            ],
            Action::Putdown(x) => vec![Predicate::holding(x.as_str())],
            Action::Unstack(x, y) => vec![
                Predicate::on(x.as_str(), y.as_str()),
                Predicate::clear(x.as_str()),
                Predicate::ArmEmpty,
            ],
            Action::Stack(x, y) => vec![
                Predicate::holding(x.as_str()),
                Predicate::clear(y.as_str()),
            ],
        }
    }

    /// Predicates made true by the action.
    pub fn add_effects(&self) -> Vec<Predicate> {
        match self {
            Action::Pickup(x) => vec![Predicate::holding(x.as_str())],
            Action::Putdown(x) => vec![
                Predicate::on_table(x.as_str()),
                Predicate::clear(x.as_str()),
                Predicate::ArmEmpty,
            ],
            Action::Unstack(x, y) => vec![
                Predicate::holding(x.as_str()),
                Predicate::clear(y.as_str()),
            ],
            Action::Stack(x, y) => vec![
                Predicate::on(x.as_str(), y.as_str()),
                Predicate::clear(x.as_str()),
                Predicate::ArmEmpty,
            ],
        }
    }

    /// Predicates made false by the action.
    ///
    /// For every template these are exactly the preconditions.
    pub fn delete_effects(&self) -> Vec<Predicate> {
        self.preconditions()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Pickup(x) | Action::Putdown(x) => write!(f, "{}({})", self.name(), x),
            Action::Unstack(x, y) | Action::Stack(x, y) => {
                write!(f, "{}({},{})", self.name(), x, y)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Action::Pickup("A".into()).to_string(), "PICKUP(A)");
        assert_eq!(
            Action::Unstack("B".into(), "A".into()).to_string(),
            "UNSTACK(B,A)"
        );
    }

    #[test]
    fn test_stack_template() {
        let stack = Action::Stack("A".into(), "B".into());
        assert_eq!(
            stack.preconditions(),
            vec![Predicate::holding("A"), Predicate::clear("B")]
        );
        assert_eq!(
            stack.add_effects(),
            vec![
                Predicate::on("A", "B"),
                Predicate::clear("A"),
                Predicate::arm_empty()
            ]
        );
        assert_eq!(stack.delete_effects(), stack.preconditions());
    }

    #[test]
    fn test_unstack_inverts_stack() {
        let stack = Action::Stack("A".into(), "B".into());
        let unstack = Action::Unstack("A".into(), "B".into());
        assert_eq!(unstack.add_effects(), stack.delete_effects());
        assert_eq!(stack.add_effects(), unstack.delete_effects());
    }

    #[test]
    fn test_pickup_putdown_are_inverse() {
        let pickup = Action::Pickup("C".into());
        let putdown = Action::Putdown("C".into());
        assert_eq!(pickup.add_effects(), putdown.delete_effects());
        assert_eq!(putdown.add_effects(), pickup.delete_effects());
    }
}
