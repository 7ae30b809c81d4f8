//! World state: the set of predicates currently true.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::predicate::Predicate;

/// The set of currently true predicates.
///
/// After construction, the only way to change a world state is
/// [`WorldState::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldState {
    facts: BTreeSet<Predicate>,
}

impl WorldState {
    /// Create a world state from its true predicates.
    pub fn new(facts: impl IntoIterator<Item = Predicate>) -> Self {
        Self {
            facts: facts.into_iter().collect(),
        }
    }

    /// Whether `predicate` is true.
    pub fn holds(&self, predicate: &Predicate) -> bool {
        self.facts.contains(predicate)
    }

    /// Whether every predicate in `predicates` is true.
    pub fn holds_all<'a>(&self, predicates: impl IntoIterator<Item = &'a Predicate>) -> bool {
        predicates.into_iter().all(|p| self.holds(p))
    }

    /// Members of `predicates` that are false, in their original order.
    pub fn unmet(&self, predicates: &[Predicate]) -> Vec<Predicate> {
        predicates
            .iter()
            .filter(|p| !self.holds(p))
            .cloned()
            .collect()
    }

    /// Whether all of the action's preconditions are true.
    pub fn is_applicable(&self, action: &Action) -> bool {
        self.holds_all(&action.preconditions())
    }

    /// Remove the action's delete effects, then insert its add effects.
    ///
    /// Preconditions are not checked.
    pub fn apply(&mut self, action: &Action) {
        for predicate in action.delete_effects() {
            self.facts.remove(&predicate);
        }
        self.facts.extend(action.add_effects());
    }

    /// True predicates in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &Predicate> + '_ {
        self.facts.iter()
    }

    /// Number of true predicates.
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Whether nothing is true.
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// The block currently held, if any.
    pub fn held_block(&self) -> Option<&str> {
        self.facts.iter().find_map(|p| match p {
            Predicate::Holding(x) => Some(x.as_str()),
            _ => None,
        })
    }
}

impl FromIterator<Predicate> for WorldState {
    fn from_iter<I: IntoIterator<Item = Predicate>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for WorldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<String> = self.facts.iter().map(|p| p.to_string()).collect();
        write!(f, "{{{}}}", items.join(", "))
    }
}
