//! # Display Indexes
//!
//! Sections are stored under UUIDs, which nobody wants to type. The CLI addresses them
//! by a 1-based position instead, counted from the oldest section. Creating a section
//! appends a new index at the end, so existing indexes stay put until something is
//! deleted.
//!
//! Inputs may be single indexes (`3`) or inclusive ranges (`2-4`).

use crate::model::{Section, SectionMetadata};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A user-facing index for a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayIndex(pub usize);

impl fmt::Display for DisplayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DisplayIndex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<usize>() {
            Ok(0) => Err("Indexes start at 1".to_string()),
            Ok(n) => Ok(DisplayIndex(n)),
            Err(_) => Err(format!("Invalid index format: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DisplaySection {
    pub section: Section,
    pub index: DisplayIndex,
}

/// A section's metadata with its display index, for listings that never need content.
#[derive(Debug, Clone)]
pub struct IndexedMetadata {
    pub metadata: SectionMetadata,
    pub index: DisplayIndex,
}

fn display_order(a: &SectionMetadata, b: &SectionMetadata) -> Ordering {
    a.created_at
        .cmp(&b.created_at)
        .then_with(|| a.title.cmp(&b.title))
}

/// Assigns display indexes, oldest first.
pub fn index_sections(mut sections: Vec<Section>) -> Vec<DisplaySection> {
    sections.sort_by(|a, b| display_order(&a.metadata, &b.metadata));

    sections
        .into_iter()
        .enumerate()
        .map(|(i, section)| DisplaySection {
            section,
            index: DisplayIndex(i + 1),
        })
        .collect()
}

/// Parses one input that may be a single index or a range like `2-4`.
pub fn parse_index_or_range(s: &str) -> Result<Vec<DisplayIndex>, String> {
    let Some((start, end)) = s.split_once('-') else {
        return Ok(vec![s.parse()?]);
    };

    let start: DisplayIndex = start.parse()?;
    let end: DisplayIndex = end.parse()?;
    if start > end {
        return Err(format!("Invalid range {}: start is after end", s));
    }
    Ok((start.0..=end.0).map(DisplayIndex).collect())
}

/// Parses many inputs, expanding ranges and dropping duplicates while keeping order.
pub fn parse_indexes<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<DisplayIndex>, String> {
    let mut result: Vec<DisplayIndex> = Vec::new();
    for input in inputs {
        for idx in parse_index_or_range(input.as_ref())? {
            if !result.contains(&idx) {
                result.push(idx);
            }
        }
    }
    Ok(result)
}

/// Same ordering as [`index_sections`], over metadata alone.
pub fn index_metadata(mut metadata: Vec<SectionMetadata>) -> Vec<IndexedMetadata> {
    metadata.sort_by(display_order);

    metadata
        .into_iter()
        .enumerate()
        .map(|(i, metadata)| IndexedMetadata {
            metadata,
            index: DisplayIndex(i + 1),
        })
        .collect()
}
