use crate::error::{PassageError, Result};
use crate::index::{
    index_metadata, index_sections, DisplayIndex, DisplaySection, IndexedMetadata,
};
use crate::store::DataStore;
use uuid::Uuid;

pub fn indexed_sections<S: DataStore>(store: &S) -> Result<Vec<DisplaySection>> {
    let sections = store.list_sections()?;
    Ok(index_sections(sections))
}

pub fn indexed_metadata<S: DataStore>(store: &S) -> Result<Vec<IndexedMetadata>> {
    let metadata = store.list_metadata()?;
    Ok(index_metadata(metadata))
}

pub fn resolve_indexes<S: DataStore>(
    store: &S,
    indexes: &[DisplayIndex],
) -> Result<Vec<(DisplayIndex, Uuid)>> {
    let indexed = indexed_metadata(store)?;

    indexes
        .iter()
        .map(|idx| {
            indexed
                .iter()
                .find(|im| &im.index == idx)
                .map(|im| (*idx, im.metadata.id))
                .ok_or_else(|| PassageError::Api(format!("Index {} not found", idx)))
        })
        .collect()
}

pub fn sections_by_indexes<S: DataStore>(
    store: &S,
    indexes: &[DisplayIndex],
) -> Result<Vec<DisplaySection>> {
    let resolved = resolve_indexes(store, indexes)?;
    let mut sections = Vec::with_capacity(resolved.len());
    for (index, id) in resolved {
        let section = store.get_section(&id)?;
        sections.push(DisplaySection { section, index });
    }
    Ok(sections)
}

/// Resolves `indexes`, or every section when none are given.
pub fn sections_or_all<S: DataStore>(
    store: &S,
    indexes: &[DisplayIndex],
) -> Result<Vec<DisplaySection>> {
    if indexes.is_empty() {
        indexed_sections(store)
    } else {
        sections_by_indexes(store, indexes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn test_resolve_unknown_index() {
        let fixture = StoreFixture::new().with_section("A", "", &[]);
        let err = resolve_indexes(&fixture.store, &[DisplayIndex(2)]).unwrap_err();
        assert!(err.to_string().contains("Index 2 not found"));
    }

    #[test]
    fn test_sections_or_all() {
        let fixture = StoreFixture::new()
            .with_section("A", "", &[])
            .with_section("B", "", &[]);
        assert_eq!(sections_or_all(&fixture.store, &[]).unwrap().len(), 2);
        let picked = sections_or_all(&fixture.store, &[DisplayIndex(2)]).unwrap();
        assert_eq!(picked[0].section.metadata.title, "B");
    }
}
