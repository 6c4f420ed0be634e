use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PassageError, Result};
use crate::model::{ModuleKind, Section};
use crate::store::DataStore;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Imports text files as sections. The first line is the title, leading blank lines of
/// the body are dropped. Directories import every file with one of `import_exts`.
pub fn run<S: DataStore>(
    store: &mut S,
    paths: Vec<PathBuf>,
    module: ModuleKind,
    import_exts: &[String],
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut imported = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut entries: Vec<PathBuf> = fs::read_dir(&path)
                .map_err(PassageError::Io)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.is_file() && has_import_ext(p, import_exts))
                .collect();
            entries.sort();
            for sub_path in entries {
                import_one(store, &sub_path, module, &mut result, &mut imported);
            }
        } else if path.is_file() {
            import_one(store, &path, module, &mut result, &mut imported);
        } else {
            result.add_message(CmdMessage::warning(format!(
                "Path not found: {}",
                path.display()
            )));
        }
    }

    result.add_message(CmdMessage::success(format!(
        "Total imported: {}",
        imported.len()
    )));
    Ok(result.with_affected_sections(imported))
}

fn import_one<S: DataStore>(
    store: &mut S,
    path: &Path,
    module: ModuleKind,
    result: &mut CmdResult,
    imported: &mut Vec<Section>,
) {
    match import_file(store, path, module) {
        Ok(section) => {
            result.add_message(CmdMessage::info(format!("Imported: {}", path.display())));
            imported.push(section);
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "import failed");
            result.add_message(CmdMessage::warning(format!(
                "Failed to import {}: {}",
                path.display(),
                e
            )));
        }
    }
}

fn has_import_ext(path: &Path, import_exts: &[String]) -> bool {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .is_some_and(|ext| import_exts.contains(&ext))
}

fn import_file<S: DataStore>(store: &mut S, path: &Path, module: ModuleKind) -> Result<Section> {
    let raw = fs::read_to_string(path).map_err(PassageError::Io)?;
    let (title, body) = split_title(&raw);
    if title.is_empty() {
        return Err(PassageError::Api("file has no title line".to_string()));
    }

    let section = Section::new(title, module, &body);
    store.save_section(&section)?;
    Ok(section)
}

fn split_title(raw: &str) -> (String, String) {
    let mut lines = raw.lines();
    let title = lines.next().unwrap_or_default().trim().to_string();
    let body: Vec<&str> = lines.skip_while(|l| l.trim().is_empty()).collect();
    (title, body.join("\n").trim_end().to_string())
}
