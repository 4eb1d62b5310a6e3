//! Anchor-driven indentation
//!
//!     Newlines are indented from the anchor governing the position the newline is typed at.
//!     Any other insertion checks whether a sink sits on the current line, in which case the
//!     whole line is moved to the sink's level. That is how an `end` typed deep inside nested
//!     statements jumps back to the column of the block it closes.

use super::{clamp_offset, line_start, reference_level, AutoEditStrategy, DocumentCommand};
use crate::indent::anchor::Anchor;
use crate::indent::anchor_list::AnchorList;
use crate::indent::rendering::{leading_whitespace, IndentStyle};
use crate::indent::section::SectionId;
use tracing::debug;

pub struct AnchorIndenter<'a> {
    anchors: &'a AnchorList,
    style: IndentStyle,
}

impl<'a> AnchorIndenter<'a> {
    pub fn new(anchors: &'a AnchorList, style: IndentStyle) -> Self {
        AnchorIndenter { anchors, style }
    }

    /// Level of the lines `anchor` governs. Anything derived from the sentinel sits at 0.
    ///
    /// A sink scanned outside any class references offset 0, so it lines up with the
    /// first line of the document.
    pub fn level_of(&self, document: &str, anchor: &Anchor) -> usize {
        if anchor.section == SectionId::Bottom {
            return 0;
        }
        anchor.target_level(reference_level(document, anchor.reference, &self.style))
    }

    /// Whitespace for a line opened by a newline typed at `offset`.
    pub fn newline_indent(&self, document: &str, offset: usize) -> String {
        let anchor = self.anchors.anchor_at(offset);
        let level = self.level_of(document, anchor);
        let line = &document[line_start(document, offset)..];
        debug!(offset, %anchor, level, "newline indent");
        self.style.render_indent(leading_whitespace(line), level)
    }

    /// Whitespace for the line holding `offset`, if a sink sits on it.
    pub fn sink_indent(&self, document: &str, offset: usize) -> Option<String> {
        let sink = self.anchors.sink_at(offset);
        let start = line_start(document, offset);
        if !sink.is_sink() || sink.offset < start {
            return None;
        }
        let level = self.level_of(document, sink);
        debug!(offset, %sink, level, "sink indent");
        Some(self.style.render_indent(leading_whitespace(&document[start..]), level))
    }
}

impl AutoEditStrategy for AnchorIndenter<'_> {
    fn customize(&self, document: &str, command: &mut DocumentCommand) {
        if let Some(line_break) = command.line_break() {
            let indent = self.newline_indent(document, command.offset);
            command.text = format!("{line_break}{indent}");
            return;
        }

        let Some(indent) = self.sink_indent(document, command.offset) else {
            return;
        };
        let start = line_start(document, command.offset);
        let typed = &document[start..clamp_offset(document, command.offset)];
        let current = leading_whitespace(typed);
        if current == indent {
            return;
        }
        let rest = &typed[current.len()..];
        let text = format!("{indent}{rest}{}", command.text);
        let caret = start + text.len();
        command.length += command.offset - start;
        command.offset = start;
        command.text = text;
        command.caret_offset = Some(caret);
    }
}
