use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::grading::{self, GradeOptions, Submission};
use crate::index::DisplayIndex;
use crate::store::DataStore;
use tracing::debug;

use super::helpers::sections_by_indexes;

pub fn run<S: DataStore>(
    store: &S,
    index: DisplayIndex,
    submission: &Submission,
    options: &GradeOptions,
) -> Result<CmdResult> {
    let ds = sections_by_indexes(store, &[index])?.remove(0);
    let report = grading::grade(&ds.section, submission, options);
    debug!(
        section = %ds.section.metadata.id,
        correct = report.correct,
        total = report.total,
        "graded submission"
    );

    let mut result = CmdResult::default();
    let unkeyed = report
        .items
        .iter()
        .filter(|i| i.outcome == grading::Outcome::NoKey)
        .count();
    if unkeyed > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} question{} without an expected answer were not scored",
            unkeyed,
            if unkeyed == 1 { "" } else { "s" }
        )));
    }
    let extra: Vec<&str> = submission
        .keys()
        .filter(|n| !report.items.iter().any(|i| &i.number == *n))
        .map(String::as_str)
        .collect();
    if !extra.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "Ignored answers for questions not in the passage: {}",
            extra.join(", ")
        )));
    }

    result.add_message(CmdMessage::success(format!(
        "{}: {}/{}",
        ds.section.metadata.title, report.correct, report.total
    )));
    result.grade = Some(report);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::{parse_submission, Outcome};
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn test_grades_selected_section() {
        let fixture = StoreFixture::new()
            .with_section("Other", "{{1}blanks}", &[("1", "no")])
            .with_section("Reading 2", "{{1}blanks} {{2}boolean}", &[("1", "river"), ("2", "false")]);

        let submission = parse_submission("1=River\n2=F\n5=extra").unwrap();
        let result = run(&fixture.store, DisplayIndex(2), &submission, &GradeOptions::default()).unwrap();

        let report = result.grade.as_ref().unwrap();
        assert_eq!(report.correct, 2);
        assert!(report.items.iter().all(|i| i.outcome == Outcome::Correct));
        assert!(result.messages.iter().any(|m| m.content.ends_with("not in the passage: 5")));
        assert!(result.messages.iter().any(|m| m.content == "Reading 2: 2/2"));
    }

    #[test]
    fn test_unknown_index_errors() {
        let fixture = StoreFixture::new();
        assert!(run(&fixture.store, DisplayIndex(1), &Submission::new(), &GradeOptions::default()).is_err());
    }
}
