use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::DisplayIndex;
use crate::placeholder::to_display_content;
use crate::store::DataStore;

use super::helpers::sections_by_indexes;

/// Fetches sections for reading. With `display`, content comes back in the editing
/// form instead of storage form.
pub fn run<S: DataStore>(store: &S, indexes: &[DisplayIndex], display: bool) -> Result<CmdResult> {
    let mut sections = sections_by_indexes(store, indexes)?;
    if display {
        for ds in &mut sections {
            ds.section.content = to_display_content(&ds.section.content);
        }
    }
    Ok(CmdResult::default().with_listed_sections(sections))
}
