use crate::answers::check_coverage;
use crate::commands::{CmdMessage, CmdResult, SectionCoverage};
use crate::error::Result;
use crate::index::DisplayIndex;
use crate::store::DataStore;

use super::helpers::sections_or_all;

/// Verifies that every referenced question has an expected answer.
pub fn run<S: DataStore>(store: &S, indexes: &[DisplayIndex]) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut incomplete = 0;

    for ds in sections_or_all(store, indexes)? {
        let coverage = check_coverage(&ds.section.content, &ds.section.metadata.answers);
        let title = ds.section.metadata.title.clone();

        if !coverage.missing.is_empty() {
            incomplete += 1;
            result.add_message(CmdMessage::warning(format!(
                "{} ({}): no answer for {}",
                title,
                ds.index,
                coverage.missing.join(", ")
            )));
        }
        if !coverage.orphaned.is_empty() {
            result.add_message(CmdMessage::info(format!(
                "{} ({}): answers for questions not in the passage: {}",
                title,
                ds.index,
                coverage.orphaned.join(", ")
            )));
        }

        result.coverage.push(SectionCoverage {
            index: ds.index,
            title,
            coverage,
        });
    }

    if incomplete == 0 {
        result.add_message(CmdMessage::success("All answer keys are complete"));
    } else {
        result.add_message(CmdMessage::error(format!(
            "{} section{} with incomplete answer keys",
            incomplete,
            if incomplete == 1 { "" } else { "s" }
        )));
    }
    Ok(result)
}
