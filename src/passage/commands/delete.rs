use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::DisplayIndex;
use crate::store::DataStore;

use super::helpers::resolve_indexes;

pub fn run<S: DataStore>(store: &mut S, indexes: &[DisplayIndex]) -> Result<CmdResult> {
    // Resolve everything first; deleting shifts the indexes of later sections
    let resolved = resolve_indexes(store, indexes)?;
    let mut result = CmdResult::default();

    for (display_index, id) in resolved {
        let section = store.get_section(&id)?;
        store.delete_section(&id)?;
        result.add_message(CmdMessage::success(format!(
            "Section deleted ({}): {}",
            display_index, section.metadata.title
        )));
        result.affected_sections.push(section);
    }

    Ok(result)
}
