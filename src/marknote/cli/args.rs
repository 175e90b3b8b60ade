use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
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
#[command(name = "marknote", bin_name = "marknote", version = get_version())]
#[command(about = "Markdown notes with tags, search and .md import/export", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new note
    #[command(alias = "n")]
    New {
        /// Title (defaults to "New Note")
        #[arg(short, long)]
        title: Option<String>,

        /// Markdown content
        #[arg(short, long)]
        content: Option<String>,

        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },

    /// List notes
    #[command(alias = "ls")]
    List {
        /// Only notes whose title, content or tags contain this term
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show a note
    #[command(alias = "v")]
    Show {
        /// List position (1-based) or id prefix
        note: String,

        /// Render the content as HTML
        #[arg(long)]
        html: bool,
    },

    /// Edit a note (opens $EDITOR when no field is given)
    #[command(alias = "e")]
    Edit {
        /// List position (1-based) or id prefix
        note: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        content: Option<String>,

        /// Comma-separated tags, replaces the current ones
        #[arg(long)]
        tags: Option<String>,
    },

    /// Delete a note
    #[command(alias = "rm")]
    Delete {
        /// List position (1-based) or id prefix
        note: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Import text files (or directories of them) as notes
    Import {
        #[arg(required = true, num_args = 1..)]
        paths: Vec<PathBuf>,
    },

    /// Write a note to <title>.md
    Export {
        /// List position (1-based) or id prefix
        note: String,

        /// Target directory (defaults to the current directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Copy a note's content to the clipboard
    Copy {
        /// List position (1-based) or id prefix
        note: String,
    },

    /// Apply markdown formatting to a character range of a note
    Format {
        /// List position (1-based) or id prefix
        note: String,

        /// bold, italic, code, link, header or list
        kind: String,

        /// Start offset (characters)
        start: usize,

        /// End offset (characters, exclusive)
        end: usize,
    },

    /// Toggle dark mode
    Theme,

    /// Get or set configuration
    Config {
        /// Configuration key (storage-key, autosave-ms, import-extensions)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
