//! # API Facade
//!
//! The single entry point for every passage operation, whatever the UI. It parses
//! user-level index strings (`"3"`, `"2-4"`), pulls grading options out of the
//! configuration, and dispatches to `commands/*`. It performs no I/O of its own and
//! returns structured `CmdResult`s.
//!
//! `PassageApi<S: DataStore>` is generic over the store: `FileStore` in production,
//! `InMemoryStore` in tests. Text conversion needs no store and is called directly
//! through [`commands::convert::run`].

use crate::commands::{self, config::ConfigAction};
use crate::config::PassageConfig;
use crate::error::{PassageError, Result};
use crate::grading::{GradeOptions, Submission};
use crate::index::{parse_indexes, DisplayIndex};
use crate::model::ModuleKind;
use crate::store::DataStore;
use std::path::PathBuf;

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel, SectionUpdate};

pub struct PassageApi<S: DataStore> {
    store: S,
    config_dir: PathBuf,
    config: PassageConfig,
}

impl<S: DataStore> PassageApi<S> {
    pub fn new(store: S, config_dir: PathBuf, config: PassageConfig) -> Self {
        Self {
            store,
            config_dir,
            config,
        }
    }

    pub fn config(&self) -> &PassageConfig {
        &self.config
    }

    pub fn create_section(
        &mut self,
        title: String,
        module: ModuleKind,
        content: String,
    ) -> Result<CmdResult> {
        commands::create::run(&mut self.store, title, module, content)
    }

    pub fn list_sections(&self, module: Option<ModuleKind>) -> Result<CmdResult> {
        commands::list::run(&self.store, module)
    }

    pub fn view_sections<I: AsRef<str>>(&self, indexes: &[I], display: bool) -> Result<CmdResult> {
        let indexes = parse_index_args(indexes)?;
        commands::view::run(&self.store, &indexes, display)
    }

    pub fn update_sections(&mut self, updates: &[SectionUpdate]) -> Result<CmdResult> {
        commands::update::run(&mut self.store, updates)
    }

    pub fn delete_sections<I: AsRef<str>>(&mut self, indexes: &[I]) -> Result<CmdResult> {
        let indexes = parse_index_args(indexes)?;
        commands::delete::run(&mut self.store, &indexes)
    }

    pub fn question_refs<I: AsRef<str>>(&self, indexes: &[I]) -> Result<CmdResult> {
        let indexes = parse_index_args(indexes)?;
        commands::refs::run(&self.store, &indexes)
    }

    pub fn set_answer(&mut self, index: &str, number: &str, answer: &str) -> Result<CmdResult> {
        commands::answer::set(&mut self.store, parse_single(index)?, number, answer)
    }

    pub fn clear_answer(&mut self, index: &str, number: &str) -> Result<CmdResult> {
        commands::answer::clear(&mut self.store, parse_single(index)?, number)
    }

    pub fn check_answers<I: AsRef<str>>(&self, indexes: &[I]) -> Result<CmdResult> {
        let indexes = parse_index_args(indexes)?;
        commands::check::run(&self.store, &indexes)
    }

    pub fn grade(&self, index: &str, submission: &Submission) -> Result<CmdResult> {
        let options = GradeOptions {
            case_sensitive: self.config.case_sensitive,
            separator: self.config.answer_separator.clone(),
        };
        commands::grade::run(&self.store, parse_single(index)?, submission, &options)
    }

    pub fn import_sections(&mut self, paths: Vec<PathBuf>, module: ModuleKind) -> Result<CmdResult> {
        let exts = self.config.import_extensions.clone();
        commands::import::run(&mut self.store, paths, module, &exts)
    }

    pub fn export_sections<I: AsRef<str>>(
        &self,
        indexes: &[I],
        dest: Option<PathBuf>,
    ) -> Result<CmdResult> {
        let indexes = parse_index_args(indexes)?;
        commands::export::run(&self.store, &indexes, dest)
    }

    pub fn section_paths<I: AsRef<str>>(&self, indexes: &[I]) -> Result<CmdResult> {
        let indexes = parse_index_args(indexes)?;
        commands::paths::run(&self.store, &indexes)
    }

    pub fn config_action(&mut self, action: ConfigAction) -> Result<CmdResult> {
        let result = commands::config::run(&self.config_dir, action)?;
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }
}

fn parse_index_args<I: AsRef<str>>(indexes: &[I]) -> Result<Vec<DisplayIndex>> {
    parse_indexes(indexes).map_err(PassageError::Api)
}

fn parse_single(index: &str) -> Result<DisplayIndex> {
    index.parse().map_err(PassageError::Api)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::parse_submission;
    use crate::store::memory::InMemoryStore;
    use tempfile::TempDir;

    fn api() -> (TempDir, PassageApi<InMemoryStore>) {
        let dir = TempDir::new().unwrap();
        let api = PassageApi::new(
            InMemoryStore::new(),
            dir.path().to_path_buf(),
            PassageConfig::default(),
        );
        (dir, api)
    }

    #[test]
    fn test_create_then_refs() {
        let (_dir, mut api) = api();
        api.create_section("R1".into(), ModuleKind::Reading, "{{10}mcq} ⟦Q2:blanks⟧".into())
            .unwrap();
        let result = api.question_refs(&["1"]).unwrap();
        assert_eq!(result.refs[0].refs, vec!["2", "10"]);
    }

    #[test]
    fn test_bad_index_is_api_error() {
        let (_dir, api) = api();
        assert!(matches!(api.view_sections(&["x"], false), Err(PassageError::Api(_))));
        assert!(matches!(api.grade("0", &Submission::new()), Err(PassageError::Api(_))));
    }

    #[test]
    fn test_grade_uses_configured_separator() {
        let (_dir, mut api) = api();
        api.create_section("R1".into(), ModuleKind::Reading, "{{1}blanks}".into())
            .unwrap();
        api.config_action(ConfigAction::Set("answer-separator".into(), "/".into()))
            .unwrap();
        api.set_answer("1", "1", "colour/color").unwrap();

        let submission = parse_submission("1=color").unwrap();
        let result = api.grade("1", &submission).unwrap();
        assert_eq!(result.grade.unwrap().correct, 1);
    }

    #[test]
    fn test_ranges_expand() {
        let (_dir, mut api) = api();
        for title in ["A", "B", "C"] {
            api.create_section(title.into(), ModuleKind::Reading, "".into())
                .unwrap();
        }
        let result = api.delete_sections(&["1-2"]).unwrap();
        assert_eq!(result.affected_sections.len(), 2);
        assert_eq!(api.list_sections(None).unwrap().listed_metadata.len(), 1);
    }
}
