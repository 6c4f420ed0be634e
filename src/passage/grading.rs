//! # Grading
//!
//! A candidate's submission is scored against a section's answer key, one item per
//! question number the passage references. Numbers without an expected answer are
//! reported as `NoKey` and do not count towards the total.
//!
//! ## Matching
//!
//! Both sides are trimmed and internal whitespace collapsed. Comparison ignores case
//! unless the centre configures `case-sensitive`. An expected answer may list
//! alternatives (`colour|color`); matching any one is enough.
//!
//! `boolean` questions normalise the common spellings first, so `T`, `yes` and `true`
//! all grade the same, as do `NG` and `not given`.

use crate::answers::validate_number;
use crate::error::{PassageError, Result};
use crate::model::Section;
use crate::placeholder::{extract_question_refs, question_kinds, QuestionKind};
use serde::Serialize;
use std::collections::BTreeMap;

/// Given answers keyed by question number.
pub type Submission = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct GradeOptions {
    pub case_sensitive: bool,
    pub separator: String,
}

impl Default for GradeOptions {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            separator: "|".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Incorrect,
    Unanswered,
    NoKey,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradedItem {
    pub number: String,
    pub kind: QuestionKind,
    pub expected: Option<String>,
    pub given: Option<String>,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GradeReport {
    pub items: Vec<GradedItem>,
    pub correct: usize,
    /// Items that have an expected answer
    pub total: usize,
}

impl GradeReport {
    pub fn percentage(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.correct as f64 * 100.0 / self.total as f64)
        }
    }
}

pub fn grade(section: &Section, submission: &Submission, options: &GradeOptions) -> GradeReport {
    let kinds = question_kinds(&section.content);
    let mut report = GradeReport::default();

    for number in extract_question_refs(&section.content) {
        let kind = kinds.get(&number).copied().unwrap_or(QuestionKind::Blanks);
        let expected = section.metadata.answers.get(&number).cloned();
        let given = submission
            .get(&number)
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty());

        let outcome = match (&expected, &given) {
            (None, _) => Outcome::NoKey,
            (Some(_), None) => Outcome::Unanswered,
            (Some(exp), Some(giv)) => {
                if is_match(kind, exp, giv, options) {
                    Outcome::Correct
                } else {
                    Outcome::Incorrect
                }
            }
        };

        if expected.is_some() {
            report.total += 1;
        }
        if outcome == Outcome::Correct {
            report.correct += 1;
        }

        report.items.push(GradedItem {
            number,
            kind,
            expected,
            given,
            outcome,
        });
    }

    report
}

fn is_match(kind: QuestionKind, expected: &str, given: &str, options: &GradeOptions) -> bool {
    let given = normalize(given, options.case_sensitive);
    let alternatives: Vec<&str> = if options.separator.is_empty() {
        vec![expected]
    } else {
        expected.split(options.separator.as_str()).collect()
    };
    alternatives
        .into_iter()
        .map(|alt| normalize(alt, options.case_sensitive))
        .filter(|alt| !alt.is_empty())
        .any(|alt| match kind {
            QuestionKind::Boolean => canonical_boolean(&alt) == canonical_boolean(&given),
            _ => alt == given,
        })
}

fn normalize(s: &str, case_sensitive: bool) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if case_sensitive {
        collapsed
    } else {
        collapsed.to_lowercase()
    }
}

fn canonical_boolean(s: &str) -> String {
    let lower = s.to_lowercase();
    match lower.as_str() {
        "t" | "true" | "y" | "yes" => "true".to_string(),
        "f" | "false" | "n" | "no" => "false".to_string(),
        "ng" | "not given" | "notgiven" => "not given".to_string(),
        _ => lower,
    }
}

/// Parses a submission from either a JSON object or `number=answer` lines.
///
/// Lines may use `=` or `:` as the separator. Blank lines and lines starting with `#`
/// are skipped.
pub fn parse_submission(text: &str) -> Result<Submission> {
    let trimmed = text.trim();
    if trimmed.starts_with('{') {
        let parsed: BTreeMap<String, serde_json::Value> =
            serde_json::from_str(trimmed).map_err(PassageError::Serialization)?;
        let mut submission = Submission::new();
        for (number, value) in parsed {
            validate_number(&number)?;
            let answer = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Null => continue,
                other => other.to_string(),
            };
            submission.insert(number, answer);
        }
        return Ok(submission);
    }

    let mut submission = Submission::new();
    for (line_no, line) in trimmed.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        // Split at the first separator so answers may themselves contain `=` or `:`
        let sep = line.find(['=', ':']).ok_or_else(|| {
            PassageError::Api(format!(
                "Line {}: expected 'number=answer', got '{}'",
                line_no + 1,
                line
            ))
        })?;
        let (number, answer) = (&line[..sep], &line[sep + 1..]);
        let number = number.trim();
        validate_number(number)?;
        submission.insert(number.to_string(), answer.trim().to_string());
    }
    Ok(submission)
}
