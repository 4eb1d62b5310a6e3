//! Anchor list
//!
//!     The engine behind auto-indentation. The scanner reports structural events in document
//!     order and the list keeps two structures up to date:
//!
//!         - a scope stack of the anchors currently open, whose bottom is always the
//!           [BOTTOM](Anchor::BOTTOM) sentinel
//!         - an append-only log of every anchor created, in offset order
//!
//!     The stack only drives the event handling. Lookups go through the log: the anchor that
//!     governs a position is the last logged anchor before it.
//!
//! Storage
//!
//!     Stack entries are indices into the log. When a completed statement demotes its
//!     anchor from `Indent` to `Same`, the logged entry changes with it, so lookups inside the
//!     finished statement see the demoted directive.
//!
//! Robustness
//!
//!     A file being typed is rarely well formed. No event fails: popping never removes the
//!     sentinel, and closing a section nobody opened unwinds to the sentinel and carries on.
//!     A malformed sequence yields a plausible indentation, never an error.

use super::anchor::Anchor;
use super::modifier::IndentModifier;
use super::script::ScanEvent;
use super::section::{SectionId, SectionPattern};
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorList {
    stack: Vec<usize>,
    anchors: Vec<Anchor>,
    continuing_statement: bool,
}

impl AnchorList {
    pub fn new() -> Self {
        AnchorList {
            stack: vec![0],
            anchors: vec![Anchor::BOTTOM],
            continuing_statement: false,
        }
    }

    /// Build a fresh list from a recorded scan pass.
    pub fn replay<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a ScanEvent>,
    {
        let mut list = AnchorList::new();
        for event in events {
            list.apply(event);
        }
        list
    }

    /// Dispatch one scan event to the matching operation.
    pub fn apply(&mut self, event: &ScanEvent) {
        match event {
            ScanEvent::BeginSection {
                offset,
                reference,
                modifier,
                section,
            } => self.begin_section(*offset, *reference, *modifier, section.clone()),
            ScanEvent::AddAnchor {
                offset,
                reference,
                modifier,
            } => self.add_anchor(*offset, *reference, *modifier),
            ScanEvent::BeginStatement { offset } => self.begin_statement(*offset),
            ScanEvent::CompleteStatement { offset } => self.complete_statement(*offset),
            ScanEvent::PopPast { pattern, offset } => self.pop_past(pattern, *offset),
            ScanEvent::AddSink { offset } => self.add_sink(*offset),
        }
    }

    // ===== Lookups =====

    /// The anchor governing lines that begin after `offset`.
    pub fn anchor_at(&self, offset: usize) -> &Anchor {
        self.last_before(offset, false)
    }

    /// The sink governing the line a sinking token before `offset` sits on.
    pub fn sink_at(&self, offset: usize) -> &Anchor {
        self.last_before(offset, true)
    }

    fn last_before(&self, offset: usize, affects_own_line: bool) -> &Anchor {
        self.anchors
            .iter()
            .rev()
            .find(|anchor| anchor.offset < offset && anchor.affects_own_line == affects_own_line)
            .unwrap_or(&self.anchors[0])
    }

    /// Every anchor logged so far, in creation order.
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Open anchors, bottom first.
    pub fn open_anchors(&self) -> impl Iterator<Item = &Anchor> + '_ {
        self.stack.iter().map(move |&index| &self.anchors[index])
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_continuing_statement(&self) -> bool {
        self.continuing_statement
    }

    // ===== Scan events =====

    /// Open a named section at `offset`.
    pub fn begin_section(
        &mut self,
        offset: usize,
        reference: usize,
        modifier: IndentModifier,
        section: SectionId,
    ) {
        trace!(offset, reference, %modifier, %section, "begin section");
        self.push(Anchor::new(offset, reference, modifier, section, false));
    }

    /// Open an anonymous section, invisible to [pop_past](Self::pop_past) patterns.
    pub fn add_anchor(&mut self, offset: usize, reference: usize, modifier: IndentModifier) {
        self.begin_section(offset, reference, modifier, SectionId::Anonymous);
    }

    /// A statement starts at `offset`.
    ///
    /// The first statement start since the last completion indents the lines after it. A
    /// further start before completion (several statements on one line) continues at the
    /// same level and opens an anonymous section.
    pub fn begin_statement(&mut self, offset: usize) {
        let (modifier, section) = if self.continuing_statement {
            (IndentModifier::Same, SectionId::Anonymous)
        } else {
            (IndentModifier::Indent, SectionId::Newline)
        };
        self.begin_section(offset.saturating_add(1), offset, modifier, section);
        self.continuing_statement = true;
    }

    /// A statement terminator sits at `offset`.
    ///
    /// Unwinds to the innermost statement or class section. A statement found there has been
    /// consumed, so its anchor is demoted to `Same` before being logged again at `offset`.
    pub fn complete_statement(&mut self, offset: usize) {
        while !self.top_is_bottom() && !self.top().section.is_statement_or_block_boundary() {
            self.pop();
        }
        let top = self.top_index();
        if self.anchors[top].section == SectionId::Newline {
            self.anchors[top].modifier = IndentModifier::Same;
        }
        trace!(offset, top = %self.anchors[top], "complete statement");
        self.duplicate_top_at(offset);
        self.continuing_statement = false;
    }

    /// Close the innermost section matching `pattern` and log its parent at `offset`.
    pub fn pop_past(&mut self, pattern: &SectionPattern, offset: usize) {
        while !self.top_is_bottom() && !self.top().section.matches(pattern) {
            self.pop();
        }
        if self.top_is_bottom() {
            debug!(offset, %pattern, "no open section matches, unwound to bottom");
        }
        self.pop();
        trace!(offset, %pattern, top = %self.top(), "pop past");
        self.duplicate_top_at(offset);
    }

    /// A token at `offset` sinks its own line to the innermost open class.
    pub fn add_sink(&mut self, offset: usize) {
        let reference = self
            .open_anchors()
            .filter(|anchor| anchor.section == SectionId::Class)
            .last()
            .map_or(0, |anchor| anchor.reference);
        trace!(offset, reference, "add sink");
        self.push(Anchor::new(
            offset,
            reference,
            IndentModifier::Same,
            SectionId::Anonymous,
            true,
        ));
    }

    // ===== Stack primitives =====

    fn push(&mut self, anchor: Anchor) {
        self.anchors.push(anchor);
        self.stack.push(self.anchors.len() - 1);
    }

    /// Pop the stack, keeping the sentinel.
    fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    /// Log a copy of the stack top at `offset` without opening anything.
    fn duplicate_top_at(&mut self, offset: usize) {
        let duplicate = self.top().at(offset);
        self.anchors.push(duplicate);
    }

    fn top_index(&self) -> usize {
        self.stack.last().copied().unwrap_or(0)
    }

    fn top(&self) -> &Anchor {
        &self.anchors[self.top_index()]
    }

    fn top_is_bottom(&self) -> bool {
        self.stack.len() <= 1
    }
}

impl Default for AnchorList {
    fn default() -> Self {
        Self::new()
    }
}
