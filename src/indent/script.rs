//! Scan event scripts
//!
//!     A scan pass is just a sequence of calls into [AnchorList]. Recording it as data lets a
//!     pass be replayed without the tokenizer that produced it, which is how the CLI and the
//!     integration tests drive the engine.
//!
//!     Scripts are a flat list of events, in JSON or YAML:
//!
//!         - event: begin_section
//!           offset: 0
//!           reference: 0
//!           modifier: indent
//!           section: class
//!         - event: begin_statement
//!           offset: 20
//!         - event: pop_past
//!           pattern: when|if
//!           offset: 80

use super::anchor_list::AnchorList;
use super::modifier::IndentModifier;
use super::section::{SectionId, SectionPattern};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One call into the scanning API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScanEvent {
    BeginSection {
        offset: usize,
        reference: usize,
        modifier: IndentModifier,
        section: SectionId,
    },
    AddAnchor {
        offset: usize,
        reference: usize,
        modifier: IndentModifier,
    },
    BeginStatement {
        offset: usize,
    },
    CompleteStatement {
        offset: usize,
    },
    PopPast {
        pattern: SectionPattern,
        offset: usize,
    },
    AddSink {
        offset: usize,
    },
}

impl ScanEvent {
    pub fn offset(&self) -> usize {
        match self {
            ScanEvent::BeginSection { offset, .. }
            | ScanEvent::AddAnchor { offset, .. }
            | ScanEvent::BeginStatement { offset }
            | ScanEvent::CompleteStatement { offset }
            | ScanEvent::PopPast { offset, .. }
            | ScanEvent::AddSink { offset } => *offset,
        }
    }
}

/// Errors raised while loading or writing a script
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON script: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML script: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unknown script format for {}, expected .json, .yaml or .yml", .0.display())]
    UnknownFormat(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFormat {
    Json,
    Yaml,
}

impl ScriptFormat {
    pub fn from_path(path: &Path) -> Result<Self, ScriptError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(ScriptFormat::Json),
            Some("yaml") | Some("yml") => Ok(ScriptFormat::Yaml),
            _ => Err(ScriptError::UnknownFormat(path.to_path_buf())),
        }
    }
}

/// A recorded scan pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventScript {
    pub events: Vec<ScanEvent>,
}

impl EventScript {
    pub fn new(events: Vec<ScanEvent>) -> Self {
        EventScript { events }
    }

    pub fn parse(text: &str, format: ScriptFormat) -> Result<Self, ScriptError> {
        let script = match format {
            ScriptFormat::Json => serde_json::from_str(text)?,
            ScriptFormat::Yaml => serde_yaml::from_str(text)?,
        };
        Ok(script)
    }

    /// Load a script, picking the format from the file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let format = ScriptFormat::from_path(path)?;
        let text = fs::read_to_string(path)?;
        EventScript::parse(&text, format)
    }

    pub fn render(&self, format: ScriptFormat) -> Result<String, ScriptError> {
        let text = match format {
            ScriptFormat::Json => serde_json::to_string_pretty(self)?,
            ScriptFormat::Yaml => serde_yaml::to_string(self)?,
        };
        Ok(text)
    }

    /// Whether event offsets never decrease, as the scanning API expects.
    pub fn is_ordered(&self) -> bool {
        self.events
            .windows(2)
            .all(|pair| pair[0].offset() <= pair[1].offset())
    }

    pub fn replay(&self) -> AnchorList {
        AnchorList::replay(&self.events)
    }
}
