//! # Inline Question Placeholders
//!
//! Section passages embed interactive questions as inline tokens. A token carries a
//! question number and a question kind, and comes in two spellings:
//!
//! ```text
//! storage form   {{7}blanks}      what the store persists
//! display form   ⟦Q7:blanks⟧      what an author edits in a text area
//! ```
//!
//! Only `blanks`, `dropdown` and `boolean` travel between the two forms. `mcq`
//! placeholders stay in storage form even inside the editor, because multiple choice
//! options are authored as block metadata rather than inline. The legacy storage
//! keyword `true-false` is neither converted nor referenced.
//!
//! Anything that does not match exactly (missing brace, unknown keyword, non-ASCII
//! digits) is plain text. None of the functions here can fail.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// `{{N}kind}` for every kind that counts as a reference.
static STORAGE_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{([0-9]+)\}(mcq|blanks|dropdown|boolean)\}").expect("valid storage pattern")
});

/// `⟦QN:kind⟧` for every kind that counts as a reference.
static DISPLAY_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"⟦Q([0-9]+):(mcq|blanks|dropdown|boolean)⟧").expect("valid display pattern")
});

static STORAGE_CONVERTIBLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{([0-9]+)\}(blanks|dropdown|boolean)\}").expect("valid storage pattern")
});

static DISPLAY_CONVERTIBLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"⟦Q([0-9]+):(blanks|dropdown|boolean)⟧").expect("valid display pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Mcq,
    Blanks,
    Dropdown,
    Boolean,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Mcq => "mcq",
            QuestionKind::Blanks => "blanks",
            QuestionKind::Dropdown => "dropdown",
            QuestionKind::Boolean => "boolean",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mcq" => Ok(QuestionKind::Mcq),
            "blanks" => Ok(QuestionKind::Blanks),
            "dropdown" => Ok(QuestionKind::Dropdown),
            "boolean" | "true-false" => Ok(QuestionKind::Boolean),
            other => Err(format!("Unknown question kind: {}", other)),
        }
    }
}

/// Which spelling a placeholder was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    Storage,
    Display,
}

/// A single placeholder occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// The digits exactly as written (`"03"` stays `"03"`).
    pub number: String,
    pub kind: QuestionKind,
    pub form: Form,
    /// Byte range of the whole token in the scanned text.
    pub span: Range<usize>,
}

impl Placeholder {
    fn from_captures(caps: &Captures<'_>, form: Form) -> Option<Self> {
        let whole = caps.get(0)?;
        let number = caps.get(1)?.as_str().to_string();
        let kind = caps.get(2)?.as_str().parse().ok()?;
        Some(Self {
            number,
            kind,
            form,
            span: whole.range(),
        })
    }
}

/// Returns every question number referenced by `content`, deduplicated and sorted by
/// numeric value.
///
/// Both storage and display spellings count, for all four kinds.
///
/// ```
/// use passage::placeholder::extract_question_refs;
///
/// assert_eq!(extract_question_refs("{{10}mcq} and {{2}blanks}"), vec!["2", "10"]);
/// assert_eq!(extract_question_refs("{{3}mcq} ... ⟦Q3:blanks⟧"), vec!["3"]);
/// assert!(extract_question_refs("no placeholders").is_empty());
/// ```
pub fn extract_question_refs(content: &str) -> Vec<String> {
    let found: BTreeSet<&str> = STORAGE_REF
        .captures_iter(content)
        .chain(DISPLAY_REF.captures_iter(content))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();

    let mut refs: Vec<String> = found.into_iter().map(str::to_string).collect();
    refs.sort_by(|a, b| cmp_numeric(a, b));
    refs
}

/// Rewrites storage-form `blanks`, `dropdown` and `boolean` placeholders into display
/// form. `mcq` and `true-false` are left as they are.
///
/// ```
/// use passage::placeholder::to_display_content;
///
/// assert_eq!(
///     to_display_content("{{5}mcq} and {{6}blanks}"),
///     "{{5}mcq} and ⟦Q6:blanks⟧"
/// );
/// ```
pub fn to_display_content(value: &str) -> String {
    STORAGE_CONVERTIBLE
        .replace_all(value, "⟦Q${1}:${2}⟧")
        .into_owned()
}

/// Rewrites display-form `blanks`, `dropdown` and `boolean` placeholders back into
/// storage form.
///
/// ```
/// use passage::placeholder::to_storage_content;
///
/// assert_eq!(
///     to_storage_content("Choose: ⟦Q1:dropdown⟧ then ⟦Q2:boolean⟧"),
///     "Choose: {{1}dropdown} then {{2}boolean}"
/// );
/// ```
pub fn to_storage_content(value: &str) -> String {
    DISPLAY_CONVERTIBLE
        .replace_all(value, "{{${1}}${2}}")
        .into_owned()
}

/// Every recognised placeholder in `content`, in order of appearance.
pub fn find_placeholders(content: &str) -> Vec<Placeholder> {
    let mut found: Vec<Placeholder> = STORAGE_REF
        .captures_iter(content)
        .filter_map(|caps| Placeholder::from_captures(&caps, Form::Storage))
        .chain(
            DISPLAY_REF
                .captures_iter(content)
                .filter_map(|caps| Placeholder::from_captures(&caps, Form::Display)),
        )
        .collect();

    found.sort_by_key(|p| p.span.start);
    found
}

/// The kind each question number is first written with.
pub fn question_kinds(content: &str) -> BTreeMap<String, QuestionKind> {
    let mut kinds = BTreeMap::new();
    for placeholder in find_placeholders(content) {
        kinds.entry(placeholder.number).or_insert(placeholder.kind);
    }
    kinds
}

/// Orders digit strings by the integer they spell, without parsing them.
pub fn cmp_numeric(a: &str, b: &str) -> Ordering {
    let a_trim = a.trim_start_matches('0');
    let b_trim = b.trim_start_matches('0');
    a_trim
        .len()
        .cmp(&b_trim.len())
        .then_with(|| a_trim.cmp(b_trim))
        .then_with(|| a.cmp(b))
}
