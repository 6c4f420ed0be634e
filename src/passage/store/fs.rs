use super::DataStore;
use crate::error::{PassageError, Result};
use crate::model::{Section, SectionMetadata};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

const DATA_FILENAME: &str = "data.json";

pub struct FileStore {
    root: PathBuf,
    file_ext: String,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            file_ext: ".txt".to_string(),
        }
    }

    pub fn with_file_ext(mut self, ext: &str) -> Self {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn section_filename(&self, id: &Uuid) -> String {
        format!("section-{}{}", id, self.file_ext)
    }

    /// Look for the content file under the configured extension, then `.txt`
    fn find_section_file(&self, id: &Uuid) -> Option<PathBuf> {
        let path = self.root.join(self.section_filename(id));
        if path.exists() {
            return Some(path);
        }

        if self.file_ext != ".txt" {
            let txt_path = self.root.join(format!("section-{}.txt", id));
            if txt_path.exists() {
                return Some(txt_path);
            }
        }

        None
    }

    fn ensure_root(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(PassageError::Io)?;
        }
        Ok(())
    }

    fn load_metadata(&self) -> Result<HashMap<Uuid, SectionMetadata>> {
        let data_file = self.root.join(DATA_FILENAME);
        if !data_file.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(data_file).map_err(PassageError::Io)?;
        let meta: HashMap<Uuid, SectionMetadata> =
            serde_json::from_str(&content).map_err(PassageError::Serialization)?;
        Ok(meta)
    }

    fn save_metadata(&self, meta: &HashMap<Uuid, SectionMetadata>) -> Result<()> {
        let data_file = self.root.join(DATA_FILENAME);
        let content = serde_json::to_string_pretty(meta).map_err(PassageError::Serialization)?;
        fs::write(data_file, content).map_err(PassageError::Io)?;
        Ok(())
    }

    fn read_content(&self, id: &Uuid) -> Result<String> {
        match self.find_section_file(id) {
            Some(path) => fs::read_to_string(path).map_err(PassageError::Io),
            None => Ok(String::new()),
        }
    }
}

impl DataStore for FileStore {
    fn save_section(&mut self, section: &Section) -> Result<()> {
        self.ensure_root()?;

        // Whatever the caller hands us, the file only ever holds storage form
        let mut stored = section.clone();
        stored.normalize();

        let mut meta_map = self.load_metadata()?;
        meta_map.insert(stored.metadata.id, stored.metadata);
        self.save_metadata(&meta_map)?;

        let path = self.root.join(self.section_filename(&section.metadata.id));
        fs::write(&path, &stored.content).map_err(PassageError::Io)?;
        debug!(id = %section.metadata.id, path = %path.display(), "saved section");

        Ok(())
    }

    fn get_section(&self, id: &Uuid) -> Result<Section> {
        let meta_map = self.load_metadata()?;
        let metadata = meta_map
            .get(id)
            .ok_or(PassageError::SectionNotFound(*id))?
            .clone();
        let content = self.read_content(id)?;
        Ok(Section { metadata, content })
    }

    fn list_sections(&self) -> Result<Vec<Section>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let meta_map = self.load_metadata()?;
        let mut sections = Vec::with_capacity(meta_map.len());
        for (id, metadata) in meta_map {
            let content = self.read_content(&id)?;
            sections.push(Section { metadata, content });
        }
        Ok(sections)
    }

    fn list_metadata(&self) -> Result<Vec<SectionMetadata>> {
        Ok(self.load_metadata()?.into_values().collect())
    }

    fn delete_section(&mut self, id: &Uuid) -> Result<()> {
        let mut meta_map = self.load_metadata()?;
        if meta_map.remove(id).is_none() {
            return Err(PassageError::SectionNotFound(*id));
        }
        self.save_metadata(&meta_map)?;

        if let Some(path) = self.find_section_file(id) {
            fs::remove_file(path).map_err(PassageError::Io)?;
        }
        debug!(id = %id, "deleted section");

        Ok(())
    }

    fn section_path(&self, id: &Uuid) -> Result<PathBuf> {
        match self.find_section_file(id) {
            Some(path) => Ok(path),
            None => Ok(self.root.join(self.section_filename(id))),
        }
    }
}
