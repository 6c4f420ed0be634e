use crate::placeholder::{extract_question_refs, to_storage_content};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Expected answers keyed by question number, spelled as in the passage.
pub type AnswerKey = BTreeMap<String, String>;

/// The four papers of a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    #[default]
    Reading,
    Listening,
    Writing,
    Speaking,
}

impl ModuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleKind::Reading => "reading",
            ModuleKind::Listening => "listening",
            ModuleKind::Writing => "writing",
            ModuleKind::Speaking => "speaking",
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reading" | "r" => Ok(ModuleKind::Reading),
            "listening" | "l" => Ok(ModuleKind::Listening),
            "writing" | "w" => Ok(ModuleKind::Writing),
            "speaking" | "s" => Ok(ModuleKind::Speaking),
            other => Err(format!("Unknown module: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionMetadata {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    // Kept in metadata so listing does not read content files
    pub title: String,
    pub module: ModuleKind,
    #[serde(default)]
    pub answers: AnswerKey,
    /// Numbers the content references, refreshed whenever the section is saved
    #[serde(default)]
    pub question_refs: Vec<String>,
}

impl SectionMetadata {
    pub fn new(title: String, module: ModuleKind) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            title,
            module,
            answers: AnswerKey::new(),
            question_refs: Vec::new(),
        }
    }
}

/// A passage with its inline question placeholders. `content` is always in storage form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub metadata: SectionMetadata,
    pub content: String,
}

impl Section {
    pub fn new(title: String, module: ModuleKind, content: &str) -> Self {
        let mut section = Self {
            metadata: SectionMetadata::new(title, module),
            content: to_storage_content(content),
        };
        section.refresh_refs();
        section
    }

    /// Replaces the content, accepting either placeholder form.
    pub fn set_content(&mut self, content: &str) {
        self.content = to_storage_content(content);
        self.refresh_refs();
        self.metadata.updated_at = Utc::now();
    }

    /// Brings `content` to storage form and recomputes `question_refs` from it.
    pub fn normalize(&mut self) {
        self.content = to_storage_content(&self.content);
        self.refresh_refs();
    }

    fn refresh_refs(&mut self) {
        self.metadata.question_refs = extract_question_refs(&self.content);
    }

    pub fn touch(&mut self) {
        self.metadata.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_section_stores_storage_form() {
        let section = Section::new("Reading 1".into(), ModuleKind::Reading, "Fill ⟦Q1:blanks⟧");
        assert_eq!(section.content, "Fill {{1}blanks}");
    }

    #[test]
    fn test_set_content_bumps_updated_at() {
        let mut section = Section::new("Reading 1".into(), ModuleKind::Reading, "");
        let before = section.metadata.updated_at;
        section.set_content("⟦Q2:dropdown⟧ and {{3}mcq}");
        assert_eq!(section.content, "{{2}dropdown} and {{3}mcq}");
        assert!(section.metadata.updated_at >= before);
        assert_eq!(section.metadata.question_refs, vec!["2", "3"]);
    }

    #[test]
    fn test_normalize_recomputes_refs() {
        let mut section = Section::new("Reading 1".into(), ModuleKind::Reading, "{{1}mcq}");
        section.content = "{{10}mcq} ⟦Q4:boolean⟧".into();
        section.normalize();
        assert_eq!(section.content, "{{10}mcq} {{4}boolean}");
        assert_eq!(section.metadata.question_refs, vec!["4", "10"]);
    }

    #[test]
    fn test_module_kind_parsing() {
        assert_eq!("Listening".parse::<ModuleKind>(), Ok(ModuleKind::Listening));
        assert_eq!("w".parse::<ModuleKind>(), Ok(ModuleKind::Writing));
        assert!("maths".parse::<ModuleKind>().is_err());
    }

    #[test]
    fn test_metadata_without_answers_deserializes() {
        let json = r#"{
            "id": "6f1c2d7e-8a4b-4c3d-9e2f-1a2b3c4d5e6f",
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z",
            "title": "Old",
            "module": "speaking"
        }"#;
        let meta: SectionMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.module, ModuleKind::Speaking);
        assert!(meta.answers.is_empty());
    }
}
