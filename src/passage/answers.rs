//! Answer keys and their coverage of a passage.
//!
//! A key is complete when every question number the passage references has an
//! expected answer. Answers for numbers the passage no longer mentions are kept (the
//! author may be mid-edit) but reported as orphaned.

use crate::error::{PassageError, Result};
use crate::model::{AnswerKey, Section};
use crate::placeholder::{cmp_numeric, extract_question_refs};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Coverage {
    /// Every referenced number, in extraction order
    pub referenced: Vec<String>,
    /// Referenced but unanswered
    pub missing: Vec<String>,
    /// Answered but not referenced
    pub orphaned: Vec<String>,
}

impl Coverage {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

pub fn check_coverage(content: &str, key: &AnswerKey) -> Coverage {
    let referenced = extract_question_refs(content);

    let missing = referenced
        .iter()
        .filter(|n| !key.contains_key(n.as_str()))
        .cloned()
        .collect();

    let mut orphaned: Vec<String> = key
        .keys()
        .filter(|n| !referenced.contains(n))
        .cloned()
        .collect();
    orphaned.sort_by(|a, b| cmp_numeric(a, b));

    Coverage {
        referenced,
        missing,
        orphaned,
    }
}

pub fn validate_number(number: &str) -> Result<()> {
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PassageError::Api(format!(
            "Question number must be digits, got '{}'",
            number
        )));
    }
    Ok(())
}

/// Records an expected answer. Returns whether the passage references the number.
pub fn set_answer(section: &mut Section, number: &str, answer: &str) -> Result<bool> {
    validate_number(number)?;
    let answer = answer.trim();
    if answer.is_empty() {
        return Err(PassageError::Api("Answer cannot be empty".to_string()));
    }

    section
        .metadata
        .answers
        .insert(number.to_string(), answer.to_string());
    section.touch();

    Ok(extract_question_refs(&section.content)
        .iter()
        .any(|n| n == number))
}

/// Removes an expected answer. Returns whether there was one.
pub fn clear_answer(section: &mut Section, number: &str) -> Result<bool> {
    validate_number(number)?;
    let removed = section.metadata.answers.remove(number).is_some();
    if removed {
        section.touch();
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModuleKind;

    fn key(pairs: &[(&str, &str)]) -> AnswerKey {
        pairs
            .iter()
            .map(|(n, a)| (n.to_string(), a.to_string()))
            .collect()
    }

    #[test]
    fn test_complete_coverage() {
        let coverage = check_coverage("{{1}blanks} {{2}mcq}", &key(&[("1", "a"), ("2", "b")]));
        assert!(coverage.is_complete());
        assert_eq!(coverage.referenced, vec!["1", "2"]);
        assert!(coverage.orphaned.is_empty());
    }

    #[test]
    fn test_missing_and_orphaned() {
        let coverage = check_coverage(
            "{{10}blanks} ⟦Q2:dropdown⟧ {{3}mcq}",
            &key(&[("3", "c"), ("11", "x"), ("4", "y")]),
        );
        assert!(!coverage.is_complete());
        assert_eq!(coverage.missing, vec!["2", "10"]);
        assert_eq!(coverage.orphaned, vec!["4", "11"]);
    }

    #[test]
    fn test_empty_content_orphans_everything() {
        let coverage = check_coverage("", &key(&[("1", "a")]));
        assert!(coverage.is_complete());
        assert_eq!(coverage.orphaned, vec!["1"]);
    }

    #[test]
    fn test_set_answer_reports_reference() {
        let mut section = Section::new("R".into(), ModuleKind::Reading, "{{1}blanks}");
        assert!(set_answer(&mut section, "1", " river ").unwrap());
        assert!(!set_answer(&mut section, "2", "lake").unwrap());
        assert_eq!(section.metadata.answers.get("1").map(String::as_str), Some("river"));
        assert_eq!(section.metadata.answers.len(), 2);
    }

    #[test]
    fn test_set_answer_validates() {
        let mut section = Section::new("R".into(), ModuleKind::Reading, "");
        assert!(set_answer(&mut section, "Q1", "x").is_err());
        assert!(set_answer(&mut section, "", "x").is_err());
        assert!(set_answer(&mut section, "1", "   ").is_err());
    }

    #[test]
    fn test_clear_answer() {
        let mut section = Section::new("R".into(), ModuleKind::Reading, "");
        set_answer(&mut section, "5", "true").unwrap();
        assert!(clear_answer(&mut section, "5").unwrap());
        assert!(!clear_answer(&mut section, "5").unwrap());
    }
}
