//! Auto-edit strategies
//!
//!     The editor side of the anchor log. Every keystroke reaches the editor as a pending
//!     [DocumentCommand]: replace `length` bytes at `offset` with `text`. Before the command
//!     is applied, each [AutoEditStrategy] gets a chance to rewrite it:
//!
//!         - [AnchorIndenter] indents the line a newline opens, and sinks the line a closing
//!           keyword is typed on
//!         - [BlockCloser] types the matching `end <id>;` when a block header is finished
//!
//!     Strategies only look at the document text before the edit and at an anchor log built
//!     from it. They never touch the document themselves.

pub mod block_closer;
pub mod indenter;

pub use block_closer::BlockCloser;
pub use indenter::AnchorIndenter;

use super::rendering::{leading_whitespace, IndentStyle};
use once_cell::sync::Lazy;
use regex::Regex;

static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A(\r\n|\n|\r)[ \t]*\z").unwrap());

/// A single pending edit, expressed in byte offsets over the unedited document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentCommand {
    pub offset: usize,
    pub length: usize,
    pub text: String,
    /// Where the caret goes after the edit. `None` leaves it after the inserted text.
    pub caret_offset: Option<usize>,
}

impl DocumentCommand {
    pub fn new(offset: usize, length: usize, text: impl Into<String>) -> Self {
        DocumentCommand {
            offset,
            length,
            text: text.into(),
            caret_offset: None,
        }
    }

    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        DocumentCommand::new(offset, 0, text)
    }

    /// The line break this command inserts, if it inserts nothing but a line break and
    /// trailing indentation.
    pub fn line_break(&self) -> Option<&str> {
        LINE_BREAK
            .captures(&self.text)
            .and_then(|captures| captures.get(1))
            .map(|found| found.as_str())
    }

    pub fn is_line_break(&self) -> bool {
        self.line_break().is_some()
    }

    /// The document with this command applied. Offsets past the end are clamped.
    pub fn apply(&self, document: &str) -> String {
        let start = clamp_offset(document, self.offset);
        let end = clamp_offset(document, self.offset.saturating_add(self.length)).max(start);
        let mut edited = String::with_capacity(document.len() + self.text.len());
        edited.push_str(&document[..start]);
        edited.push_str(&self.text);
        edited.push_str(&document[end..]);
        edited
    }

    /// Caret position after the edit.
    pub fn caret(&self) -> usize {
        self.caret_offset.unwrap_or(self.offset + self.text.len())
    }
}

/// Something that may rewrite a pending edit before it lands.
pub trait AutoEditStrategy {
    fn customize(&self, document: &str, command: &mut DocumentCommand);
}

/// Runs strategies in order over the same command.
#[derive(Default)]
pub struct AutoEditPipeline<'a> {
    strategies: Vec<Box<dyn AutoEditStrategy + 'a>>,
}

impl<'a> AutoEditPipeline<'a> {
    pub fn new() -> Self {
        AutoEditPipeline {
            strategies: Vec::new(),
        }
    }

    pub fn then(mut self, strategy: impl AutoEditStrategy + 'a) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn customize(&self, document: &str, command: &mut DocumentCommand) {
        for strategy in &self.strategies {
            strategy.customize(document, command);
        }
    }

    /// Customize `command` and apply it, returning the edited document.
    pub fn run(&self, document: &str, mut command: DocumentCommand) -> (String, DocumentCommand) {
        self.customize(document, &mut command);
        (command.apply(document), command)
    }
}

/// Largest char boundary not past `offset`.
pub fn clamp_offset(document: &str, offset: usize) -> usize {
    let mut offset = offset.min(document.len());
    while !document.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Start of the line holding `offset`.
pub fn line_start(document: &str, offset: usize) -> usize {
    let offset = clamp_offset(document, offset);
    document[..offset]
        .rfind(['\n', '\r'])
        .map_or(0, |index| index + 1)
}

/// End of the line holding `offset`, excluding the line break.
pub fn line_end(document: &str, offset: usize) -> usize {
    let offset = clamp_offset(document, offset);
    document[offset..]
        .find(['\n', '\r'])
        .map_or(document.len(), |index| offset + index)
}

/// The full line holding `offset`, without its line break.
pub fn line_at(document: &str, offset: usize) -> &str {
    &document[line_start(document, offset)..line_end(document, offset)]
}

/// Indentation level of the line holding the document offset `reference`.
pub fn reference_level(document: &str, reference: usize, style: &IndentStyle) -> usize {
    style.measure_indent(leading_whitespace(line_at(document, reference)))
}
