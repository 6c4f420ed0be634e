use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PassageError, Result};
use crate::index::{DisplayIndex, DisplaySection};
use crate::model::AnswerKey;
use crate::store::DataStore;
use chrono::Utc;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use super::helpers::sections_or_all;

const ARCHIVE_DIR: &str = "passage";

/// Writes the selected sections (all by default) to a `.tar.gz` archive. Each section
/// becomes `title\n\ncontent` in storage form; answer keys go to `answers.json`.
pub fn run<S: DataStore>(
    store: &S,
    indexes: &[DisplayIndex],
    dest: Option<PathBuf>,
) -> Result<CmdResult> {
    let sections = sections_or_all(store, indexes)?;

    if sections.is_empty() {
        let mut res = CmdResult::default();
        res.add_message(CmdMessage::info("No sections to export."));
        return Ok(res);
    }

    let path = dest.unwrap_or_else(|| {
        PathBuf::from(format!(
            "passage-{}.tar.gz",
            Utc::now().format("%Y-%m-%d_%H%M%S")
        ))
    });
    let file = File::create(&path).map_err(PassageError::Io)?;
    write_archive(file, &sections)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} section{} to {}",
        sections.len(),
        if sections.len() == 1 { "" } else { "s" },
        path.display()
    )));
    Ok(result.with_section_paths(vec![path]))
}

fn write_archive<W: Write>(writer: W, sections: &[DisplaySection]) -> Result<()> {
    let enc = GzEncoder::new(writer, Compression::default());
    let mut tar = tar::Builder::new(enc);
    let mut keys: BTreeMap<String, &AnswerKey> = BTreeMap::new();

    for ds in sections {
        let meta = &ds.section.metadata;
        let entry_name = format!(
            "{}-{}.txt",
            sanitize_filename(&meta.title),
            &meta.id.to_string()[..8]
        );
        let content = format!("{}\n\n{}", meta.title, ds.section.content);
        append(&mut tar, &entry_name, content.as_bytes())?;
        keys.insert(entry_name, &meta.answers);
    }

    let answers = serde_json::to_string_pretty(&keys).map_err(PassageError::Serialization)?;
    append(&mut tar, "answers.json", answers.as_bytes())?;

    let enc = tar.into_inner().map_err(PassageError::Io)?;
    enc.finish().map_err(PassageError::Io)?;
    Ok(())
}

fn append<W: Write>(tar: &mut tar::Builder<W>, name: &str, data: &[u8]) -> Result<()> {
    let mut header = tar::Header::new_gnu();
    header.set_size(data.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    tar.append_data(&mut header, format!("{}/{}", ARCHIVE_DIR, name), data)
        .map_err(PassageError::Io)
}

fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}
