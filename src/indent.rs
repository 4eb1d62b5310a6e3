//! Indentation anchors
//!
//!     The scanner never decides indentation itself. It leaves anchors behind as it walks
//!     the text, each one saying "from this offset on, lines are indented relative to that
//!     reference". Deciding the indentation of a line is then a lookup of the last anchor
//!     before it.
//!
//!     Two kinds of anchors exist. Regular anchors govern the lines after their offset, which
//!     is what a freshly inserted newline needs. Sinks govern the line they sit on, which is
//!     what a closing keyword such as `end` needs: it must align with the block it closes,
//!     however deep the statements inside the block nested.

pub mod anchor;
pub mod anchor_list;
pub mod auto_edit;
pub mod modifier;
pub mod rendering;
pub mod script;
pub mod section;
pub mod testing;

pub use anchor::Anchor;
pub use anchor_list::AnchorList;
pub use modifier::IndentModifier;
pub use rendering::{leading_whitespace, IndentStyle};
pub use script::{EventScript, ScanEvent, ScriptError, ScriptFormat};
pub use section::{SectionId, SectionPattern};
