//! Blocks-world predicates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of a block.
pub type Block = String;

/// A blocks-world proposition.
///
/// Identity is structural: two predicates are equal exactly when they have
/// the same variant and the same arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Predicate {
    /// First block sits directly on the second.
    On(Block, Block),
    /// Block sits on the table.
    #[serde(rename = "ONTABLE")]
    OnTable(Block),
    /// Nothing is on top of the block.
    Clear(Block),
    /// The arm holds the block.
    Holding(Block),
    /// The arm holds nothing.
    #[serde(rename = "ARMEMPTY")]
    ArmEmpty,
}

impl Predicate {
    pub fn on(x: impl Into<Block>, y: impl Into<Block>) -> Self {
        Predicate::On(x.into(), y.into())
    }

    pub fn on_table(x: impl Into<Block>) -> Self {
        Predicate::OnTable(x.into())
    }

    pub fn clear(x: impl Into<Block>) -> Self {
        Predicate::Clear(x.into())
    }

    pub fn holding(x: impl Into<Block>) -> Self {
        Predicate::Holding(x.into())
    }

    pub fn arm_empty() -> Self {
        Predicate::ArmEmpty
    }

    /// Upper-case predicate name.
    pub fn name(&self) -> &'static str {
        match self {
            Predicate::On(..) => "ON",
            Predicate::OnTable(_) => "ONTABLE",
            Predicate::Clear(_) => "CLEAR",
            Predicate::Holding(_) => "HOLDING",
            Predicate::ArmEmpty => "ARMEMPTY",
        }
    }

    /// Blocks named by this predicate, in argument order.
    pub fn blocks(&self) -> Vec<&str> {
        match self {
            Predicate::On(x, y) => vec![x.as_str(), y.as_str()],
            Predicate::OnTable(x) | Predicate::Clear(x) | Predicate::Holding(x) => {
                vec![x.as_str()]
            }
            Predicate::ArmEmpty => Vec::new(),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::ArmEmpty => f.write_str(self.name()),
            other => write!(f, "{}({})", other.name(), other.blocks().join(",")),
        }
    }
}

/// Render predicates as `[P1, P2, ...]`.
pub(crate) fn display_list(predicates: &[Predicate]) -> String {
    let items: Vec<String> = predicates.iter().map(|p| p.to_string()).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Predicate::on("A", "B").to_string(), "ON(A,B)");
        assert_eq!(Predicate::on_table("C").to_string(), "ONTABLE(C)");
        assert_eq!(Predicate::clear("A").to_string(), "CLEAR(A)");
        assert_eq!(Predicate::holding("B").to_string(), "HOLDING(B)");
        assert_eq!(Predicate::arm_empty().to_string(), "ARMEMPTY");
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(Predicate::on("A", "B"), Predicate::On("A".into(), "B".into()));
        assert_ne!(Predicate::on("A", "B"), Predicate::on("B", "A"));
        assert_ne!(Predicate::clear("A"), Predicate::holding("A"));
    }

    #[test]
    fn test_blocks() {
        assert_eq!(Predicate::on("A", "B").blocks(), vec!["A", "B"]);
        assert!(Predicate::arm_empty().blocks().is_empty());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Predicate::on_table("A")).unwrap();
        assert_eq!(json, r#"{"ONTABLE":"A"}"#);
        let json = serde_json::to_string(&Predicate::arm_empty()).unwrap();
        assert_eq!(json, r#""ARMEMPTY""#);
        let back: Predicate = serde_json::from_str(r#"{"ON":["A","B"]}"#).unwrap();
        assert_eq!(back, Predicate::on("A", "B"));
    }

    #[test]
    fn test_display_list() {
        let list = vec![Predicate::on("A", "B"), Predicate::arm_empty()];
        assert_eq!(display_list(&list), "[ON(A,B), ARMEMPTY]");
    }
}
