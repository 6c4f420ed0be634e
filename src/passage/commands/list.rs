use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::ModuleKind;
use crate::store::DataStore;

use super::helpers::indexed_metadata;

/// Lists every section, optionally only those of one module. Indexes are the
/// unfiltered ones so they can be passed straight to other commands. Only metadata is
/// read.
pub fn run<S: DataStore>(store: &S, module: Option<ModuleKind>) -> Result<CmdResult> {
    let listed = indexed_metadata(store)?
        .into_iter()
        .filter(|im| module.map_or(true, |m| im.metadata.module == m))
        .collect();
    Ok(CmdResult::default().with_listed_metadata(listed))
}
