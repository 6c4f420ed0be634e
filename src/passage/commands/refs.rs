use crate::commands::{CmdResult, SectionRefs};
use crate::error::Result;
use crate::index::DisplayIndex;
use crate::placeholder::extract_question_refs;
use crate::store::DataStore;

use super::helpers::sections_or_all;

/// Question numbers each section's passage references, numerically ordered.
pub fn run<S: DataStore>(store: &S, indexes: &[DisplayIndex]) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    for ds in sections_or_all(store, indexes)? {
        result.refs.push(SectionRefs {
            index: ds.index,
            title: ds.section.metadata.title.clone(),
            refs: extract_question_refs(&ds.section.content),
        });
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn test_refs_per_section() {
        let fixture = StoreFixture::new()
            .with_section("A", "{{10}mcq} and {{2}blanks}", &[])
            .with_section("B", "nothing here", &[]);

        let result = run(&fixture.store, &[]).unwrap();
        assert_eq!(result.refs.len(), 2);
        assert_eq!(result.refs[0].refs, vec!["2", "10"]);
        assert!(result.refs[1].refs.is_empty());
    }
}
