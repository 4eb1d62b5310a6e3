//! Block closer
//!
//!     Finishing a block header with a newline, say `model Tank` followed by Enter, also types
//!     the closing `end Tank;` one line further down, aligned with the header. The caret stays
//!     on the new empty line in between.
//!
//!     Nothing is inserted when the rest of the document already closes a block of that
//!     name, so moving through an existing model and pressing Enter after its header is
//!     harmless.

use super::{clamp_offset, line_start, AutoEditStrategy, DocumentCommand};
use crate::indent::rendering::IndentStyle;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Keywords opening a block that is closed with `end <id>;`.
pub const DEFAULT_BLOCK_KEYWORDS: &[&str] = &[
    "block",
    "when",
    "class",
    "connector",
    "function",
    "model",
    "package",
    "record",
    "type",
];

static DEFAULT_HEADER: Lazy<Regex> = Lazy::new(|| header_pattern(DEFAULT_BLOCK_KEYWORDS).unwrap());

/// `<keyword> <id>` at the very end of the text before the caret.
fn header_pattern<S: AsRef<str>>(keywords: &[S]) -> Result<Regex, regex::Error> {
    let alternatives = keywords
        .iter()
        .map(|keyword| regex::escape(keyword.as_ref()))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?:\A|\s)(?:{alternatives})\s+(\w+)\s*\z"))
}

pub struct BlockCloser {
    header: Option<Regex>,
    style: IndentStyle,
}

impl BlockCloser {
    pub fn new(style: IndentStyle) -> Self {
        BlockCloser {
            header: Some(DEFAULT_HEADER.clone()),
            style,
        }
    }

    /// A closer reacting to `keywords` instead of the defaults. No keywords disables it.
    pub fn with_keywords<S: AsRef<str>>(
        keywords: &[S],
        style: IndentStyle,
    ) -> Result<Self, regex::Error> {
        let header = if keywords.is_empty() {
            None
        } else {
            Some(header_pattern(keywords)?)
        };
        Ok(BlockCloser { header, style })
    }

    /// The identifier of the block header ending right before `offset`.
    pub fn header_id<'d>(&self, document: &'d str, offset: usize) -> Option<&'d str> {
        let before = &document[..clamp_offset(document, offset)];
        self.header
            .as_ref()?
            .captures(before)?
            .get(1)
            .map(|id| id.as_str())
    }

    fn is_closed(rest: &str, id: &str) -> bool {
        Regex::new(&format!(r"(?:\A|\s)end\s*{}\s*;", regex::escape(id)))
            .map_or(false, |closing| closing.is_match(rest))
    }
}

impl AutoEditStrategy for BlockCloser {
    fn customize(&self, document: &str, command: &mut DocumentCommand) {
        let Some(line_break) = command.line_break().map(str::to_string) else {
            return;
        };
        let Some(id) = self.header_id(document, command.offset) else {
            return;
        };
        let offset = clamp_offset(document, command.offset);
        if Self::is_closed(&document[offset..], id) {
            debug!(id, "block already closed");
            return;
        }

        let header_line = &document[line_start(document, offset)..offset];
        let indent = self.style.render_indent("", self.style.measure_indent(header_line));
        let caret = command.offset + command.text.len();
        command.text.push_str(&format!("{line_break}{indent}end {id};"));
        command.caret_offset = Some(caret);
        debug!(id, caret, "closed block");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indent::anchor_list::AnchorList;
    use crate::indent::auto_edit::{AnchorIndenter, AutoEditPipeline};
    use crate::indent::modifier::IndentModifier;
    use crate::indent::section::SectionId;

    fn close(document: &str, offset: usize) -> DocumentCommand {
        let mut command = DocumentCommand::insert(offset, "\n");
        BlockCloser::new(IndentStyle::spaces(2)).customize(document, &mut command);
        command
    }

    #[test]
    fn test_closes_model() {
        let document = "model Tank";
        let command = close(document, document.len());
        assert_eq!(command.apply(document), "model Tank\n\nend Tank;");
        assert_eq!(command.caret(), 11);
    }

    #[test]
    fn test_aligns_with_header() {
        let document = "package P\n  function f  ";
        let command = close(document, document.len());
        assert_eq!(command.text, "\n\n  end f;");
    }

    #[test]
    fn test_skips_closed_block() {
        let document = "model Tank\n  Real level;\nend Tank;";
        let command = close(document, 10);
        assert_eq!(command, DocumentCommand::insert(10, "\n"));
    }

    #[test]
    fn test_other_block_end_does_not_count() {
        let document = "model Tank\nend Valve;";
        let command = close(document, 10);
        assert_eq!(command.text, "\n\nend Tank;");
    }

    #[test]
    fn test_needs_keyword_and_identifier() {
        assert!(!close("Real x", 6).text.contains("end"));
        assert!(!close("mymodel Tank", 12).text.contains("end"));
        assert!(!close("model", 5).text.contains("end"));
    }

    #[test]
    fn test_ignores_non_newlines() {
        let document = "model Tank";
        let mut command = DocumentCommand::insert(10, ";");
        BlockCloser::new(IndentStyle::default()).customize(document, &mut command);
        assert_eq!(command.text, ";");
    }

    #[test]
    fn test_custom_keywords() {
        let closer = BlockCloser::with_keywords(&["operator"], IndentStyle::default()).unwrap();
        assert_eq!(closer.header_id("operator plus", 13), Some("plus"));
        assert_eq!(closer.header_id("model M", 7), None);

        let disabled = BlockCloser::with_keywords::<&str>(&[], IndentStyle::default()).unwrap();
        assert_eq!(disabled.header_id("model M", 7), None);
    }

    #[test]
    fn test_runs_after_indenter() {
        let document = "model Tank";
        let mut anchors = AnchorList::new();
        anchors.begin_section(0, 0, IndentModifier::Indent, SectionId::Class);
        let style = IndentStyle::spaces(2);
        let pipeline = AutoEditPipeline::new()
            .then(AnchorIndenter::new(&anchors, style.clone()))
            .then(BlockCloser::new(style));
        let (edited, command) = pipeline.run(document, DocumentCommand::insert(10, "\n"));
        assert_eq!(edited, "model Tank\n  \nend Tank;");
        assert_eq!(command.caret(), 13);
    }
}
