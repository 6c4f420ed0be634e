use crate::answers;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::DisplayIndex;
use crate::store::DataStore;

use super::helpers::resolve_indexes;

fn resolve_one<S: DataStore>(store: &S, index: DisplayIndex) -> Result<uuid::Uuid> {
    let resolved = resolve_indexes(store, &[index])?;
    Ok(resolved[0].1)
}

pub fn set<S: DataStore>(
    store: &mut S,
    index: DisplayIndex,
    number: &str,
    answer: &str,
) -> Result<CmdResult> {
    let id = resolve_one(store, index)?;
    let mut section = store.get_section(&id)?;
    let referenced = answers::set_answer(&mut section, number, answer)?;
    store.save_section(&section)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Answer {} set for {}",
        number, section.metadata.title
    )));
    if !referenced {
        result.add_message(CmdMessage::warning(format!(
            "Question {} does not appear in the passage",
            number
        )));
    }
    Ok(result.with_affected_sections(vec![section]))
}

pub fn clear<S: DataStore>(store: &mut S, index: DisplayIndex, number: &str) -> Result<CmdResult> {
    let id = resolve_one(store, index)?;
    let mut section = store.get_section(&id)?;
    let mut result = CmdResult::default();

    if answers::clear_answer(&mut section, number)? {
        store.save_section(&section)?;
        result.add_message(CmdMessage::success(format!(
            "Answer {} cleared for {}",
            number, section.metadata.title
        )));
    } else {
        result.add_message(CmdMessage::info(format!(
            "No answer recorded for question {}",
            number
        )));
    }
    Ok(result.with_affected_sections(vec![section]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn test_set_persists_answer() {
        let mut fixture = StoreFixture::new();
        let id = fixture.add("A", "{{1}blanks}", &[]);

        let result = set(&mut fixture.store, DisplayIndex(1), "1", "river").unwrap();
        assert_eq!(result.messages.len(), 1);

        let section = fixture.store.get_section(&id).unwrap();
        assert_eq!(section.metadata.answers.get("1").map(String::as_str), Some("river"));
    }

    #[test]
    fn test_set_warns_for_unreferenced() {
        let mut fixture = StoreFixture::new().with_section("A", "{{1}blanks}", &[]);
        let result = set(&mut fixture.store, DisplayIndex(1), "9", "x").unwrap();
        assert_eq!(result.messages[1].level, MessageLevel::Warning);
    }

    #[test]
    fn test_clear() {
        let mut fixture = StoreFixture::new();
        let id = fixture.add("A", "{{1}blanks}", &[("1", "river")]);

        clear(&mut fixture.store, DisplayIndex(1), "1").unwrap();
        assert!(fixture.store.get_section(&id).unwrap().metadata.answers.is_empty());

        let again = clear(&mut fixture.store, DisplayIndex(1), "1").unwrap();
        assert_eq!(again.messages[0].level, MessageLevel::Info);
    }
}
