//! # Marknote CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, while this file
//! only invokes `cli::run()` and handles process termination.
//!
//! - `cli/args.rs`: clap argument definitions
//! - `cli/commands.rs`: context wiring and per-command handlers
//! - `cli/print.rs`: terminal output for messages and notes
//!
//! Everything the handlers do goes through `marknote::api::NotesApi`; the CLI
//! owns argument parsing, prompts, colors and the exit code.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
