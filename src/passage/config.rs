use crate::error::{PassageError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_FILE_EXT: &str = ".txt";
const DEFAULT_ANSWER_SEPARATOR: &str = "|";

/// Overrides the store location when set.
pub const HOME_ENV: &str = "PASSAGE_HOME";

/// Keys accepted by `passage config`.
pub const CONFIG_KEYS: &[&str] = &["file-ext", "answer-separator", "case-sensitive", "import-exts"];

/// Configuration for passage, stored in `<root>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PassageConfig {
    /// File extension for section content files and editor buffers
    #[serde(default = "default_file_ext")]
    pub file_ext: String,

    /// Extensions to look for when importing directories
    #[serde(default = "default_import_ext")]
    pub import_extensions: Vec<String>,

    /// Separates accepted alternatives inside one expected answer
    #[serde(default = "default_answer_separator")]
    pub answer_separator: String,

    #[serde(default)]
    pub case_sensitive: bool,
}

fn default_file_ext() -> String {
    DEFAULT_FILE_EXT.to_string()
}

fn default_import_ext() -> Vec<String> {
    vec![".txt".to_string(), ".md".to_string()]
}

fn default_answer_separator() -> String {
    DEFAULT_ANSWER_SEPARATOR.to_string()
}

impl Default for PassageConfig {
    fn default() -> Self {
        Self {
            file_ext: default_file_ext(),
            import_extensions: default_import_ext(),
            answer_separator: default_answer_separator(),
            case_sensitive: false,
        }
    }
}

impl PassageConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(PassageError::Io)?;
        let config: PassageConfig =
            serde_json::from_str(&content).map_err(PassageError::Serialization)?;
        if config.answer_separator.is_empty() {
            return Err(empty_separator());
        }
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(PassageError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(PassageError::Serialization)?;
        fs::write(config_path, content).map_err(PassageError::Io)?;
        Ok(())
    }

    pub fn set_file_ext(&mut self, ext: &str) {
        self.file_ext = normalize_ext(ext);
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "file-ext" => Ok(self.file_ext.clone()),
            "answer-separator" => Ok(self.answer_separator.clone()),
            "case-sensitive" => Ok(self.case_sensitive.to_string()),
            "import-exts" => Ok(self.import_extensions.join(",")),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "file-ext" => self.set_file_ext(value),
            "answer-separator" => {
                if value.is_empty() {
                    return Err(empty_separator());
                }
                self.answer_separator = value.to_string();
            }
            "case-sensitive" => {
                self.case_sensitive = value.parse().map_err(|_| {
                    PassageError::Config(format!("case-sensitive expects true or false, got '{}'", value))
                })?;
            }
            "import-exts" => {
                self.import_extensions = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(normalize_ext)
                    .collect();
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn normalize_ext(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{}", ext)
    }
}

fn empty_separator() -> PassageError {
    PassageError::Config("answer-separator cannot be empty".to_string())
}

fn unknown_key(key: &str) -> PassageError {
    PassageError::Config(format!(
        "Unknown config key '{}' (expected one of: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

/// Where sections live: `$PASSAGE_HOME`, or the platform data directory.
pub fn store_root() -> Result<PathBuf> {
    if let Ok(home) = std::env::var(HOME_ENV) {
        if !home.is_empty() {
            return Ok(PathBuf::from(home));
        }
    }

    ProjectDirs::from("com", "passage", "passage")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| PassageError::Config("Could not determine data directory".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = PassageConfig::default();
        assert_eq!(config.file_ext, ".txt");
        assert_eq!(config.answer_separator, "|");
        assert!(!config.case_sensitive);
    }

    #[test]
    fn test_set_file_ext_without_dot() {
        let mut config = PassageConfig::default();
        config.set_file_ext("md");
        assert_eq!(config.file_ext, ".md");
    }

    #[test]
    fn test_set_and_get_keys() {
        let mut config = PassageConfig::default();
        config.set("case-sensitive", "true").unwrap();
        config.set("answer-separator", "/").unwrap();
        config.set("import-exts", "md, text").unwrap();
        assert_eq!(config.get("case-sensitive").unwrap(), "true");
        assert_eq!(config.get("answer-separator").unwrap(), "/");
        assert_eq!(config.import_extensions, vec![".md", ".text"]);
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = PassageConfig::default();
        assert!(matches!(
            config.set("case-sensitive", "maybe"),
            Err(PassageError::Config(_))
        ));
        assert!(config.set("answer-separator", "").is_err());
        assert!(config.get("colour").is_err());
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let config = PassageConfig::load(dir.path().join("absent")).unwrap();
        assert_eq!(config, PassageConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let mut config = PassageConfig::default();
        config.set_file_ext(".md");
        config.save(dir.path()).unwrap();

        let loaded = PassageConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.file_ext, ".md");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"case_sensitive": true}"#).unwrap();
        let loaded = PassageConfig::load(dir.path()).unwrap();
        assert!(loaded.case_sensitive);
        assert_eq!(loaded.file_ext, ".txt");
    }

    #[test]
    fn test_load_rejects_empty_separator() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"answer_separator": ""}"#).unwrap();
        assert!(matches!(
            PassageConfig::load(dir.path()),
            Err(PassageError::Config(_))
        ));
    }
}
