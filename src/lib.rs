//! # mo-indent
//!
//! Indentation anchors for auto-indenting block-structured source code.
//!
//! A tokenizer walks the document in offset order and reports structural events (statement
//! starts and ends, named sections opening and closing, sinking keywords) to an
//! [AnchorList](indent::anchor_list::AnchorList). The list keeps a log of anchors that the
//! editor queries when a newline is inserted or a closing keyword is typed, and the
//! [rendering](indent::rendering) helpers turn the resulting level back into whitespace.
//!
//! File Layout
//!
//! src/indent
//!   ├── modifier, anchor, section    The value types the engine is built from
//!   ├── anchor_list                  The scope stack and anchor log
//!   ├── rendering                    Whitespace <-> indentation level
//!   ├── script                       Recorded scan events, replayable outside the editor
//!   └── auto_edit                    Editor strategies built on top of the anchor log
//!
//! For the shared test helpers, see the [testing module](indent::testing).

pub mod indent;
