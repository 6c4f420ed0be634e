//! # Command Layer
//!
//! One module per operation. Every command takes a store (and plain Rust arguments),
//! returns a [`CmdResult`], and never prints. What went well or badly along the way is
//! reported as [`CmdMessage`]s for the UI to render however it likes.

use crate::answers::Coverage;
use crate::config::PassageConfig;
use crate::grading::GradeReport;
use crate::index::{DisplayIndex, DisplaySection, IndexedMetadata};
use crate::model::Section;
use std::path::PathBuf;

pub mod answer;
pub mod check;
pub mod config;
pub mod convert;
pub mod create;
pub mod delete;
pub mod export;
pub mod grade;
pub mod helpers;
pub mod import;
pub mod list;
pub mod paths;
pub mod refs;
pub mod update;
pub mod view;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Question numbers referenced by one section.
#[derive(Debug, Clone)]
pub struct SectionRefs {
    pub index: DisplayIndex,
    pub title: String,
    pub refs: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SectionCoverage {
    pub index: DisplayIndex,
    pub title: String,
    pub coverage: Coverage,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_sections: Vec<Section>,
    pub listed_sections: Vec<DisplaySection>,
    /// Listings built from metadata alone
    pub listed_metadata: Vec<IndexedMetadata>,
    pub refs: Vec<SectionRefs>,
    pub coverage: Vec<SectionCoverage>,
    pub grade: Option<GradeReport>,
    pub section_paths: Vec<PathBuf>,
    pub config: Option<PassageConfig>,
    /// Free text produced by the command, e.g. converted content
    pub output: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_sections(mut self, sections: Vec<Section>) -> Self {
        self.affected_sections = sections;
        self
    }

    pub fn with_listed_sections(mut self, sections: Vec<DisplaySection>) -> Self {
        self.listed_sections = sections;
        self
    }

    pub fn with_listed_metadata(mut self, metadata: Vec<IndexedMetadata>) -> Self {
        self.listed_metadata = metadata;
        self
    }

    pub fn with_section_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.section_paths = paths;
        self
    }

    pub fn with_config(mut self, config: PassageConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_output(mut self, output: String) -> Self {
        self.output = Some(output);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}

/// A requested change to one section. `None` leaves the field as it is.
#[derive(Debug, Clone)]
pub struct SectionUpdate {
    pub index: DisplayIndex,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl SectionUpdate {
    pub fn new(index: DisplayIndex) -> Self {
        Self {
            index,
            title: None,
            content: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}
