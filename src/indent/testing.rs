//! Testing utilities
//!
//!     Scan passes are written with [ScanBuilder], which reads in the order a tokenizer would
//!     report events, and checked with the fluent [assert_anchor] assertions:
//!
//!     ```rust,ignore
//!     let list = ScanBuilder::new()
//!         .class(0, 0)
//!         .statement(20)
//!         .complete(40)
//!         .replay();
//!
//!     assert_anchor(list.anchor_at(45))
//!         .offset(40)
//!         .reference(20)
//!         .modifier(IndentModifier::Same);
//!     ```
//!
//!     [render_log] prints a log one anchor per line, for snapshot tests.

use super::anchor::Anchor;
use super::anchor_list::AnchorList;
use super::modifier::IndentModifier;
use super::script::{EventScript, ScanEvent};
use super::section::{SectionId, SectionPattern};

/// Builds a scan pass event by event.
#[derive(Debug, Clone, Default)]
pub struct ScanBuilder {
    events: Vec<ScanEvent>,
}

impl ScanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(
        mut self,
        offset: usize,
        reference: usize,
        modifier: IndentModifier,
        section: &str,
    ) -> Self {
        self.events.push(ScanEvent::BeginSection {
            offset,
            reference,
            modifier,
            section: SectionId::from_tag(section),
        });
        self
    }

    /// A class header at `offset`, indenting its body relative to `reference`.
    pub fn class(self, offset: usize, reference: usize) -> Self {
        self.section(offset, reference, IndentModifier::Indent, "class")
    }

    pub fn anchor(mut self, offset: usize, reference: usize, modifier: IndentModifier) -> Self {
        self.events.push(ScanEvent::AddAnchor {
            offset,
            reference,
            modifier,
        });
        self
    }

    pub fn statement(mut self, offset: usize) -> Self {
        self.events.push(ScanEvent::BeginStatement { offset });
        self
    }

    pub fn complete(mut self, offset: usize) -> Self {
        self.events.push(ScanEvent::CompleteStatement { offset });
        self
    }

    pub fn pop_past(mut self, pattern: &str, offset: usize) -> Self {
        self.events.push(ScanEvent::PopPast {
            pattern: SectionPattern::parse(pattern),
            offset,
        });
        self
    }

    pub fn sink(mut self, offset: usize) -> Self {
        self.events.push(ScanEvent::AddSink { offset });
        self
    }

    pub fn script(self) -> EventScript {
        EventScript::new(self.events)
    }

    pub fn replay(&self) -> AnchorList {
        AnchorList::replay(&self.events)
    }
}

/// One anchor per line, in log order.
pub fn render_log(list: &AnchorList) -> String {
    list.anchors()
        .iter()
        .map(|anchor| anchor.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn assert_anchor(anchor: &Anchor) -> AnchorAssertion<'_> {
    AnchorAssertion {
        anchor,
        context: anchor.to_string(),
    }
}

pub struct AnchorAssertion<'a> {
    anchor: &'a Anchor,
    context: String,
}

impl<'a> AnchorAssertion<'a> {
    pub fn offset(self, expected: usize) -> Self {
        assert_eq!(
            self.anchor.offset, expected,
            "{}: Expected offset {}, found {}",
            self.context, expected, self.anchor.offset
        );
        self
    }

    pub fn reference(self, expected: usize) -> Self {
        assert_eq!(
            self.anchor.reference, expected,
            "{}: Expected reference {}, found {}",
            self.context, expected, self.anchor.reference
        );
        self
    }

    pub fn modifier(self, expected: IndentModifier) -> Self {
        assert_eq!(
            self.anchor.modifier, expected,
            "{}: Expected modifier {}, found {}",
            self.context, expected, self.anchor.modifier
        );
        self
    }

    pub fn section(self, expected: &str) -> Self {
        assert_eq!(
            self.anchor.section.tag(),
            expected,
            "{}: Expected section {}, found {}",
            self.context,
            expected,
            self.anchor.section
        );
        self
    }

    pub fn sink(self) -> Self {
        assert!(self.anchor.is_sink(), "{}: Expected a sink", self.context);
        self
    }

    pub fn not_sink(self) -> Self {
        assert!(!self.anchor.is_sink(), "{}: Expected no sink", self.context);
        self
    }

    pub fn bottom(self) -> Self {
        assert!(self.anchor.is_bottom(), "{}: Expected the bottom anchor", self.context);
        self
    }
}
