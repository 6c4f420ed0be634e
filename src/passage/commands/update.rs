use crate::commands::{CmdMessage, CmdResult, SectionUpdate};
use crate::error::{PassageError, Result};
use crate::placeholder::extract_question_refs;
use crate::store::DataStore;
use tracing::debug;

use super::helpers::resolve_indexes;

/// Applies edits. Content may arrive in display form straight from an editor; it is
/// stored in storage form.
pub fn run<S: DataStore>(store: &mut S, updates: &[SectionUpdate]) -> Result<CmdResult> {
    let indexes: Vec<_> = updates.iter().map(|u| u.index).collect();
    let resolved = resolve_indexes(store, &indexes)?;
    let mut result = CmdResult::default();

    for ((display_index, id), update) in resolved.into_iter().zip(updates) {
        let mut section = store.get_section(&id)?;
        let before = extract_question_refs(&section.content);

        if let Some(title) = &update.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(PassageError::Api("Title cannot be empty".to_string()));
            }
            section.metadata.title = title.to_string();
            section.touch();
        }
        if let Some(content) = &update.content {
            section.set_content(content);
        }

        store.save_section(&section)?;
        debug!(id = %id, "updated section");

        let after = extract_question_refs(&section.content);
        result.add_message(CmdMessage::success(format!(
            "Section updated ({}): {}",
            display_index, section.metadata.title
        )));
        let dropped: Vec<&String> = before.iter().filter(|n| !after.contains(n)).collect();
        if !dropped.is_empty() {
            let answered: Vec<&str> = dropped
                .iter()
                .filter(|n| section.metadata.answers.contains_key(n.as_str()))
                .map(|n| n.as_str())
                .collect();
            if !answered.is_empty() {
                result.add_message(CmdMessage::warning(format!(
                    "Answers kept for questions no longer in the passage: {}",
                    answered.join(", ")
                )));
            }
        }
        result.affected_sections.push(section);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::index::DisplayIndex;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn test_display_content_is_stored_as_storage() {
        let mut fixture = StoreFixture::new();
        let id = fixture.add("A", "{{1}blanks}", &[]);

        let update = SectionUpdate::new(DisplayIndex(1)).with_content("⟦Q1:blanks⟧ and ⟦Q2:boolean⟧");
        run(&mut fixture.store, &[update]).unwrap();

        let section = fixture.store.get_section(&id).unwrap();
        assert_eq!(section.content, "{{1}blanks} and {{2}boolean}");
    }

    #[test]
    fn test_title_only_update_keeps_content() {
        let mut fixture = StoreFixture::new();
        let id = fixture.add("A", "{{1}mcq}", &[]);

        run(&mut fixture.store, &[SectionUpdate::new(DisplayIndex(1)).with_title("B")]).unwrap();

        let section = fixture.store.get_section(&id).unwrap();
        assert_eq!(section.metadata.title, "B");
        assert_eq!(section.content, "{{1}mcq}");
    }

    #[test]
    fn test_warns_about_dropped_answered_questions() {
        let mut fixture = StoreFixture::new();
        fixture.add("A", "{{1}blanks} {{2}blanks}", &[("2", "x")]);

        let result = run(
            &mut fixture.store,
            &[SectionUpdate::new(DisplayIndex(1)).with_content("{{1}blanks}")],
        )
        .unwrap();
        assert!(result
            .messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning && m.content.ends_with(": 2")));
    }

    #[test]
    fn test_rejects_empty_title() {
        let mut fixture = StoreFixture::new().with_section("A", "", &[]);
        let update = SectionUpdate::new(DisplayIndex(1)).with_title(" ");
        assert!(run(&mut fixture.store, &[update]).is_err());
    }
}
