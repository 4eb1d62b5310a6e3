//! Anchors
//!
//!     An anchor says "as of this offset, lines are indented `modifier` relative to
//!     `reference`". The scanner hands document offsets as references: a statement's reference
//!     is where the statement starts, and the level it stands for is the indentation of the
//!     line holding that offset (see [reference_level](super::auto_edit::reference_level)).

use super::modifier::IndentModifier;
use super::section::SectionId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub offset: usize,
    pub reference: usize,
    pub modifier: IndentModifier,
    pub section: SectionId,
    /// Governs the line the anchor sits on instead of the lines after it.
    pub affects_own_line: bool,
}

impl Anchor {
    /// The permanent base of every scope stack.
    pub const BOTTOM: Anchor = Anchor {
        offset: 0,
        reference: 0,
        modifier: IndentModifier::Same,
        section: SectionId::Bottom,
        affects_own_line: false,
    };

    pub fn new(
        offset: usize,
        reference: usize,
        modifier: IndentModifier,
        section: SectionId,
        affects_own_line: bool,
    ) -> Self {
        Anchor {
            offset,
            reference,
            modifier,
            section,
            affects_own_line,
        }
    }

    /// Same directive, moved to `offset`.
    pub fn at(&self, offset: usize) -> Self {
        Anchor {
            offset,
            ..self.clone()
        }
    }

    pub fn is_bottom(&self) -> bool {
        *self == Anchor::BOTTOM
    }

    pub fn is_sink(&self) -> bool {
        self.affects_own_line
    }

    /// Level of the governed lines, given the level `reference` resolves to.
    pub fn target_level(&self, reference_level: usize) -> usize {
        self.modifier.apply(reference_level)
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Anchor::BOTTOM
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "@{} ref={} {} [{}]",
            self.offset, self.reference, self.modifier, self.section
        )?;
        if self.affects_own_line {
            f.write_str(" sink")?;
        }
        Ok(())
    }
}
