//! # Storage Layer
//!
//! Sections are persisted behind the [`DataStore`] trait so the command layer never
//! touches the filesystem directly.
//!
//! - [`fs::FileStore`]: production storage under a single root directory
//! - [`memory::InMemoryStore`]: non-persistent storage for tests
//!
//! ## Storage Format
//!
//! ```text
//! <root>/
//! ├── data.json               # Metadata and answer keys for all sections
//! ├── section-{uuid}.txt      # Passage content, always in storage form
//! └── config.json             # See config.rs
//! ```
//!
//! Metadata and content are stored separately. [`DataStore::list_metadata`] answers
//! from `data.json` alone, so listing never opens a passage file. Metadata carries
//! the referenced question numbers for that purpose.

use crate::error::Result;
use crate::model::{Section, SectionMetadata};
use std::path::PathBuf;
use uuid::Uuid;

pub mod fs;
pub mod memory;

pub trait DataStore {
    /// Save a section (create or update)
    fn save_section(&mut self, section: &Section) -> Result<()>;

    fn get_section(&self, id: &Uuid) -> Result<Section>;

    fn list_sections(&self) -> Result<Vec<Section>>;

    /// Metadata of every section, without loading content
    fn list_metadata(&self) -> Result<Vec<SectionMetadata>>;

    /// Delete a section permanently
    fn delete_section(&mut self, id: &Uuid) -> Result<()>;

    /// Where the section's content lives, for file-based stores
    fn section_path(&self, id: &Uuid) -> Result<PathBuf>;
}
