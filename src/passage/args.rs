use clap::{Parser, Subcommand};
use passage::commands::convert::Direction;
use passage::model::ModuleKind;
use std::path::PathBuf;

/// "0.3.2" for releases, "0.3.2@abc1234 2025-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "passage", bin_name = "passage", version = get_version())]
#[command(about = "Author test sections, answer keys and grading from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new section
    #[command(alias = "n")]
    Create {
        /// Title of the section (opens the editor if not provided)
        title: Option<String>,

        /// Passage content (either placeholder form)
        content: Option<String>,

        /// Module the section belongs to
        #[arg(short, long, default_value = "reading", value_parser = parse_module)]
        module: ModuleKind,

        /// Skip opening the editor
        #[arg(long)]
        no_editor: bool,
    },

    /// List sections
    #[command(alias = "ls")]
    List {
        /// Only sections of this module
        #[arg(short, long, value_parser = parse_module)]
        module: Option<ModuleKind>,
    },

    /// Show one or more sections
    #[command(alias = "v")]
    View {
        /// Indexes of the sections (e.g. 1 3 2-4)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,

        /// Show placeholders in editing form
        #[arg(short, long)]
        display: bool,
    },

    /// Edit a section in $EDITOR
    #[command(alias = "e")]
    Edit {
        /// Indexes of the sections (e.g. 1 3 2-4)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Delete one or more sections
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// List the question numbers each passage references
    Refs {
        /// Indexes of the sections (all when omitted)
        indexes: Vec<String>,

        #[arg(long)]
        json: bool,
    },

    /// Manage answer keys
    #[command(alias = "a")]
    Answer {
        #[command(subcommand)]
        action: AnswerAction,
    },

    /// Check that every referenced question has an answer
    Check {
        /// Indexes of the sections (all when omitted)
        indexes: Vec<String>,

        #[arg(long)]
        json: bool,
    },

    /// Grade a submission against a section's answer key
    #[command(alias = "g")]
    Grade {
        /// Index of the section
        index: String,

        /// Submission file, `number=answer` lines or a JSON object (stdin when omitted)
        file: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Convert placeholder forms in free text
    Convert {
        /// to-display or to-storage
        #[arg(value_parser = parse_direction)]
        direction: Direction,

        /// Input file (stdin when omitted)
        file: Option<PathBuf>,
    },

    /// Import sections from text files or directories
    Import {
        #[arg(required = true, num_args = 1..)]
        paths: Vec<PathBuf>,

        #[arg(short, long, default_value = "reading", value_parser = parse_module)]
        module: ModuleKind,
    },

    /// Export sections to a tar.gz archive
    Export {
        /// Indexes of the sections (all when omitted)
        indexes: Vec<String>,

        /// Archive path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the content file path of one or more sections
    Path {
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., file-ext)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum AnswerAction {
    /// Record the expected answer for a question
    Set {
        index: String,
        number: String,
        /// Alternatives separated by the configured separator (default `|`)
        answer: String,
    },

    /// Remove the expected answer for a question
    Clear { index: String, number: String },
}

fn parse_module(s: &str) -> Result<ModuleKind, String> {
    s.parse()
}

fn parse_direction(s: &str) -> Result<Direction, String> {
    s.parse()
}
