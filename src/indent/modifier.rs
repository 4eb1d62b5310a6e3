//! Indent modifiers
//!
//!     A modifier says how an anchor's reference level turns into the level of the lines it
//!     governs. All the arithmetic goes through [IndentModifier::delta], so a new modifier
//!     only needs a variant and its delta.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndentModifier {
    /// Lines sit at the reference level.
    #[default]
    Same,
    /// Lines sit one unit deeper than the reference level.
    Indent,
    /// Lines sit one unit shallower than the reference level, never below zero.
    Outdent,
}

impl IndentModifier {
    /// Signed number of units this modifier adds to a reference level.
    pub fn delta(self) -> isize {
        match self {
            IndentModifier::Same => 0,
            IndentModifier::Indent => 1,
            IndentModifier::Outdent => -1,
        }
    }

    /// Apply the modifier to a reference level.
    pub fn apply(self, reference_level: usize) -> usize {
        reference_level.saturating_add_signed(self.delta())
    }
}

impl fmt::Display for IndentModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IndentModifier::Same => "same",
            IndentModifier::Indent => "indent",
            IndentModifier::Outdent => "outdent",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply() {
        assert_eq!(IndentModifier::Same.apply(3), 3);
        assert_eq!(IndentModifier::Indent.apply(3), 4);
        assert_eq!(IndentModifier::Outdent.apply(3), 2);
    }

    #[test]
    fn test_outdent_saturates_at_zero() {
        assert_eq!(IndentModifier::Outdent.apply(0), 0);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&IndentModifier::Indent).unwrap();
        assert_eq!(json, "\"indent\"");
        let parsed: IndentModifier = serde_json::from_str("\"same\"").unwrap();
        assert_eq!(parsed, IndentModifier::Same);
    }
}
