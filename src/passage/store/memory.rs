use super::DataStore;
use crate::error::{PassageError, Result};
use crate::model::{Section, SectionMetadata};
use std::collections::HashMap;
use std::path::PathBuf;
use uuid::Uuid;

/// In-memory storage for testing. Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    sections: HashMap<Uuid, Section>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataStore for InMemoryStore {
    fn save_section(&mut self, section: &Section) -> Result<()> {
        let mut stored = section.clone();
        stored.normalize();
        self.sections.insert(section.metadata.id, stored);
        Ok(())
    }

    fn get_section(&self, id: &Uuid) -> Result<Section> {
        self.sections
            .get(id)
            .cloned()
            .ok_or(PassageError::SectionNotFound(*id))
    }

    fn list_sections(&self) -> Result<Vec<Section>> {
        Ok(self.sections.values().cloned().collect())
    }

    fn list_metadata(&self) -> Result<Vec<SectionMetadata>> {
        Ok(self.sections.values().map(|s| s.metadata.clone()).collect())
    }

    fn delete_section(&mut self, id: &Uuid) -> Result<()> {
        if self.sections.remove(id).is_none() {
            return Err(PassageError::SectionNotFound(*id));
        }
        Ok(())
    }

    fn section_path(&self, id: &Uuid) -> Result<PathBuf> {
        Ok(PathBuf::from(format!("memory://section-{}", id)))
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::ModuleKind;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Adds a section and returns its id. Creation times increase with each call so
        /// display indexes follow insertion order.
        pub fn add(&mut self, title: &str, content: &str, answers: &[(&str, &str)]) -> Uuid {
            let mut section = Section::new(title.to_string(), ModuleKind::Reading, content);
            let offset = chrono::Duration::seconds(self.store.sections.len() as i64);
            section.metadata.created_at = chrono::Utc::now() - chrono::Duration::days(1) + offset;
            for (number, answer) in answers {
                section
                    .metadata
                    .answers
                    .insert(number.to_string(), answer.to_string());
            }
            let id = section.metadata.id;
            self.store.save_section(&section).unwrap();
            id
        }

        pub fn with_section(mut self, title: &str, content: &str, answers: &[(&str, &str)]) -> Self {
            self.add(title, content, answers);
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use super::*;

    #[test]
    fn test_save_normalizes_content() {
        let mut fixture = StoreFixture::new();
        let id = fixture.add("R1", "⟦Q1:boolean⟧", &[]);
        assert_eq!(
            fixture.store.get_section(&id).unwrap().content,
            "{{1}boolean}"
        );
    }

    #[test]
    fn test_delete_missing_errors() {
        let mut store = InMemoryStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(
            store.delete_section(&id),
            Err(PassageError::SectionNotFound(_))
        ));
    }
}
