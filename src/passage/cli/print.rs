use chrono::{DateTime, Utc};
use colored::Colorize;
use passage::api::{CmdMessage, MessageLevel};
use passage::commands::{SectionCoverage, SectionRefs};
use passage::grading::{GradeReport, Outcome};
use passage::index::{DisplaySection, IndexedMetadata};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const MODULE_WIDTH: usize = 10;

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub fn print_full_sections(sections: &[DisplaySection]) {
    for (i, ds) in sections.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        let meta = &ds.section.metadata;
        println!(
            "{} {} {}",
            ds.index.to_string().yellow(),
            meta.title.bold(),
            format!("[{}]", meta.module).dimmed()
        );
        println!("--------------------------------");
        println!("{}", ds.section.content);
    }
}

pub fn print_sections(sections: &[IndexedMetadata]) {
    if sections.is_empty() {
        println!("No sections found.");
        return;
    }

    for entry in sections {
        let meta = &entry.metadata;
        let idx_str = format!("{}. ", entry.index);
        let module = format!("{:<width$}", meta.module.as_str(), width = MODULE_WIDTH);
        let refs = meta.question_refs.len();
        let counts = format!(" {}q {}a ", refs, meta.answers.len());
        let time_ago = format_time_ago(meta.updated_at);

        let fixed_width =
            4 + idx_str.width() + MODULE_WIDTH + counts.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let title = truncate_to_width(&meta.title, available);
        let padding = available.saturating_sub(title.width());

        println!(
            "    {}{}{}{}{}{}",
            idx_str,
            module.cyan(),
            title,
            " ".repeat(padding),
            counts.dimmed(),
            time_ago.dimmed()
        );
    }
}

pub fn print_refs(refs: &[SectionRefs]) {
    for entry in refs {
        let numbers = if entry.refs.is_empty() {
            "(none)".dimmed().to_string()
        } else {
            entry.refs.join(", ")
        };
        println!("{} {}: {}", entry.index.to_string().yellow(), entry.title.bold(), numbers);
    }
}

pub fn print_coverage(coverage: &[SectionCoverage]) {
    for entry in coverage {
        let status = if entry.coverage.is_complete() {
            "complete".green()
        } else {
            "incomplete".red()
        };
        println!(
            "{} {} {} ({} referenced)",
            entry.index.to_string().yellow(),
            entry.title.bold(),
            status,
            entry.coverage.referenced.len()
        );
    }
}

pub fn print_grade(report: &GradeReport) {
    for item in &report.items {
        let mark = match item.outcome {
            Outcome::Correct => "✓".green(),
            Outcome::Incorrect => "✗".red(),
            Outcome::Unanswered => "–".yellow(),
            Outcome::NoKey => "?".dimmed(),
        };
        let given = item.given.as_deref().unwrap_or("");
        let expected = item.expected.as_deref().unwrap_or("");
        println!(
            "  {} {:>4} {:<9} {:<30} {}",
            mark,
            item.number,
            item.kind.as_str(),
            truncate_to_width(given, 30),
            expected.dimmed()
        );
    }
    if let Some(pct) = report.percentage() {
        println!("  {:.1}%", pct);
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("a longer title", 6), "a lon…");
    }
}
