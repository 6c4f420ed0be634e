//! External editor round trip.
//!
//! The buffer handed to the editor is `title\n\ncontent` with the content already in
//! display form, so authors type `⟦Q3:blanks⟧` rather than the storage form. Callers
//! convert back with [`crate::placeholder::to_storage_content`] (the model does this on
//! `set_content`).

use crate::error::{PassageError, Result};
use crate::placeholder::to_display_content;
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorContent {
    pub title: String,
    pub content: String,
}

impl EditorContent {
    pub fn new(title: String, content: String) -> Self {
        Self { title, content }
    }

    /// Prepares stored content for editing.
    pub fn for_editing(title: &str, stored_content: &str) -> Self {
        Self::new(title.to_string(), to_display_content(stored_content))
    }

    pub fn to_buffer(&self) -> String {
        if self.content.is_empty() {
            format!("{}\n\n", self.title)
        } else {
            format!("{}\n\n{}", self.title, self.content)
        }
    }

    /// What this content looks like after a trip through the editor buffer unchanged.
    pub fn normalized(&self) -> Self {
        Self::from_buffer(&self.to_buffer())
    }

    /// First line is the title; blank lines after it are skipped, the rest is content.
    pub fn from_buffer(buffer: &str) -> Self {
        let mut lines = buffer.lines();
        let title = lines.next().unwrap_or_default().trim().to_string();
        let body: Vec<&str> = lines.skip_while(|l| l.trim().is_empty()).collect();
        Self {
            title,
            content: body.join("\n").trim_end().to_string(),
        }
    }
}

/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(PassageError::Api(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in the user's editor, waits, and returns the file's new contents.
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();
    debug!(editor = %editor, path = %path.display(), "launching editor");

    // $EDITOR may carry arguments, e.g. "code --wait"
    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or("vi");
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| PassageError::Api(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(PassageError::Api(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    fs::read_to_string(path).map_err(PassageError::Io)
}

pub fn edit_content(initial: &EditorContent, file_extension: &str) -> Result<EditorContent> {
    let temp_file = env::temp_dir().join(format!(
        "passage-edit-{}{}",
        &Uuid::new_v4().to_string()[..8],
        file_extension
    ));

    fs::write(&temp_file, initial.to_buffer()).map_err(PassageError::Io)?;
    let edited = open_in_editor(&temp_file);
    let _ = fs::remove_file(&temp_file);

    Ok(EditorContent::from_buffer(&edited?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::to_storage_content;

    #[test]
    fn test_for_editing_uses_display_form() {
        let ec = EditorContent::for_editing("R1", "{{1}mcq} {{2}dropdown}");
        assert_eq!(ec.content, "{{1}mcq} ⟦Q2:dropdown⟧");
        assert_eq!(ec.to_buffer(), "R1\n\n{{1}mcq} ⟦Q2:dropdown⟧");
    }

    #[test]
    fn test_to_buffer_empty_content() {
        let ec = EditorContent::new("My Title".to_string(), String::new());
        assert_eq!(ec.to_buffer(), "My Title\n\n");
    }

    #[test]
    fn test_from_buffer_variants() {
        let ec = EditorContent::from_buffer("Title\n\n\nBody line\nMore\n");
        assert_eq!(ec.title, "Title");
        assert_eq!(ec.content, "Body line\nMore");

        let ec = EditorContent::from_buffer("Title\nNo blank");
        assert_eq!(ec.content, "No blank");

        let ec = EditorContent::from_buffer("");
        assert_eq!(ec.title, "");
        assert_eq!(ec.content, "");
    }

    #[test]
    fn test_unchanged_buffer_equals_normalized() {
        let initial = EditorContent::for_editing("Listening 3", "Notes ⟦Q1:blanks⟧\n\n");
        let saved_untouched = EditorContent::from_buffer(&initial.to_buffer());
        assert_ne!(saved_untouched, initial);
        assert_eq!(saved_untouched, initial.normalized());
    }

    #[test]
    fn test_buffer_round_trip_restores_storage() {
        let stored = "Pick {{3}boolean} then {{4}mcq}";
        let ec = EditorContent::for_editing("T", stored);
        let parsed = EditorContent::from_buffer(&ec.to_buffer());
        assert_eq!(parsed.title, "T");
        assert_eq!(to_storage_content(&parsed.content), stored);
    }
}
