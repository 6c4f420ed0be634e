use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::DisplayIndex;
use crate::store::DataStore;

use super::helpers::resolve_indexes;

pub fn run<S: DataStore>(store: &S, indexes: &[DisplayIndex]) -> Result<CmdResult> {
    let resolved = resolve_indexes(store, indexes)?;
    let mut paths = Vec::with_capacity(resolved.len());
    for (_, id) in resolved {
        paths.push(store.section_path(&id)?);
    }
    Ok(CmdResult::default().with_section_paths(paths))
}
