use crate::commands::CmdResult;
use crate::error::Result;
use crate::placeholder::{to_display_content, to_storage_content};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    ToDisplay,
    ToStorage,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::ToDisplay => f.write_str("to-display"),
            Direction::ToStorage => f.write_str("to-storage"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "to-display" | "display" => Ok(Direction::ToDisplay),
            "to-storage" | "storage" => Ok(Direction::ToStorage),
            other => Err(format!("Unknown direction: {}", other)),
        }
    }
}

/// Converts free text between placeholder forms. Touches no store.
pub fn run(text: &str, direction: Direction) -> Result<CmdResult> {
    let converted = match direction {
        Direction::ToDisplay => to_display_content(text),
        Direction::ToStorage => to_storage_content(text),
    };
    Ok(CmdResult::default().with_output(converted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_both_ways() {
        let shown = run("{{5}mcq} and {{6}blanks}", Direction::ToDisplay).unwrap();
        assert_eq!(shown.output.as_deref(), Some("{{5}mcq} and ⟦Q6:blanks⟧"));

        let stored = run("{{5}mcq} and ⟦Q6:blanks⟧", Direction::ToStorage).unwrap();
        assert_eq!(stored.output.as_deref(), Some("{{5}mcq} and {{6}blanks}"));
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("to-display".parse::<Direction>(), Ok(Direction::ToDisplay));
        assert_eq!("storage".parse::<Direction>(), Ok(Direction::ToStorage));
        assert!("sideways".parse::<Direction>().is_err());
    }
}
