//! Section ids and the patterns that match them
//!
//!     Every anchor records what kind of scope opened it. Two kinds are structural and
//!     looked up by the engine itself: statements (`newline`) and outer definitions (`class`).
//!     Anonymous anchors (`#`) take part in stack depth but are invisible to every pattern
//!     search. Anything else is a named section the scanner closes again with
//!     [pop_past](super::anchor_list::AnchorList::pop_past).
//!
//!     On the wire, in scripts and in JSON output, a section is its tag string.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const NEWLINE_TAG: &str = "newline";
pub const CLASS_TAG: &str = "class";
pub const ANONYMOUS_TAG: &str = "#";
pub const BOTTOM_TAG: &str = "bottom";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectionId {
    Bottom,
    Class,
    Newline,
    Anonymous,
    Named(String),
}

impl SectionId {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            BOTTOM_TAG => SectionId::Bottom,
            CLASS_TAG => SectionId::Class,
            NEWLINE_TAG => SectionId::Newline,
            ANONYMOUS_TAG => SectionId::Anonymous,
            other => SectionId::Named(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            SectionId::Bottom => BOTTOM_TAG,
            SectionId::Class => CLASS_TAG,
            SectionId::Newline => NEWLINE_TAG,
            SectionId::Anonymous => ANONYMOUS_TAG,
            SectionId::Named(tag) => tag,
        }
    }

    /// True for the sections a completed statement unwinds to.
    pub fn is_statement_or_block_boundary(&self) -> bool {
        matches!(self, SectionId::Newline | SectionId::Class)
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, SectionId::Anonymous)
    }

    /// Whether this section is one of the alternatives of `pattern`.
    ///
    /// Anonymous sections never match, whatever the pattern lists.
    pub fn matches(&self, pattern: &SectionPattern) -> bool {
        !self.is_anonymous() && pattern.contains(self.tag())
    }
}

impl From<String> for SectionId {
    fn from(tag: String) -> Self {
        SectionId::from_tag(&tag)
    }
}

impl From<&str> for SectionId {
    fn from(tag: &str) -> Self {
        SectionId::from_tag(tag)
    }
}

impl From<SectionId> for String {
    fn from(section: SectionId) -> Self {
        section.tag().to_string()
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A set of alternative section tags, written `if|for|while`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SectionPattern {
    alternatives: Vec<String>,
}

impl SectionPattern {
    pub fn new<I, S>(alternatives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SectionPattern {
            alternatives: alternatives.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse `a|b|c`. Empty alternatives are dropped, so `""` matches nothing.
    pub fn parse(pattern: &str) -> Self {
        SectionPattern::new(
            pattern
                .split('|')
                .map(str::trim)
                .filter(|alternative| !alternative.is_empty()),
        )
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.alternatives.iter().any(|alternative| alternative == tag)
    }

    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }
}

impl From<String> for SectionPattern {
    fn from(pattern: String) -> Self {
        SectionPattern::parse(&pattern)
    }
}

impl From<&str> for SectionPattern {
    fn from(pattern: &str) -> Self {
        SectionPattern::parse(pattern)
    }
}

impl From<SectionPattern> for String {
    fn from(pattern: SectionPattern) -> Self {
        pattern.to_string()
    }
}

impl fmt::Display for SectionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.alternatives.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("newline", SectionId::Newline)]
    #[case("class", SectionId::Class)]
    #[case("#", SectionId::Anonymous)]
    #[case("bottom", SectionId::Bottom)]
    #[case("when", SectionId::Named("when".to_string()))]
    fn test_tags_round_trip(#[case] tag: &str, #[case] expected: SectionId) {
        let section = SectionId::from_tag(tag);
        assert_eq!(section, expected);
        assert_eq!(section.tag(), tag);
    }

    #[test]
    fn test_boundaries() {
        assert!(SectionId::Newline.is_statement_or_block_boundary());
        assert!(SectionId::Class.is_statement_or_block_boundary());
        assert!(!SectionId::Anonymous.is_statement_or_block_boundary());
        assert!(!SectionId::Bottom.is_statement_or_block_boundary());
        assert!(!SectionId::from("if").is_statement_or_block_boundary());
    }

    #[test]
    fn test_pattern_alternatives() {
        let pattern = SectionPattern::parse("if|for| while ");
        assert_eq!(pattern.alternatives(), ["if", "for", "while"]);
        assert!(SectionId::from("for").matches(&pattern));
        assert!(!SectionId::from("when").matches(&pattern));
        assert_eq!(pattern.to_string(), "if|for|while");
    }

    #[test]
    fn test_anonymous_never_matches() {
        let pattern = SectionPattern::parse("#|class");
        assert!(!SectionId::Anonymous.matches(&pattern));
        assert!(SectionId::Class.matches(&pattern));
    }

    #[test]
    fn test_empty_pattern_matches_nothing() {
        let pattern = SectionPattern::parse("");
        assert!(pattern.alternatives().is_empty());
        assert!(!SectionId::Class.matches(&pattern));
    }

    #[test]
    fn test_serializes_as_tag() {
        let json = serde_json::to_string(&SectionId::Newline).unwrap();
        assert_eq!(json, "\"newline\"");
        let parsed: SectionPattern = serde_json::from_str("\"if|when\"").unwrap();
        assert!(parsed.contains("when"));
    }
}
