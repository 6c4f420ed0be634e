use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PassageError, Result};
use crate::model::{ModuleKind, Section};
use crate::placeholder::extract_question_refs;
use crate::store::DataStore;
use tracing::info;

pub fn run<S: DataStore>(
    store: &mut S,
    title: String,
    module: ModuleKind,
    content: String,
) -> Result<CmdResult> {
    let title = title.trim().to_string();
    if title.is_empty() {
        return Err(PassageError::Api("Title cannot be empty".to_string()));
    }

    let section = Section::new(title, module, &content);
    store.save_section(&section)?;
    info!(id = %section.metadata.id, module = %module, "created section");

    let refs = extract_question_refs(&section.content);
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Created {} section: {} ({} question{})",
        module,
        section.metadata.title,
        refs.len(),
        if refs.len() == 1 { "" } else { "s" }
    )));
    Ok(result.with_affected_sections(vec![section]))
}
