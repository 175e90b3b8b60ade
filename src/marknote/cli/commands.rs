//! # CLI Layer
//!
//! This module is **one possible UI client** for marknote. It is the only place
//! that knows about stdout/stderr, prompts and exit codes.
//!
//! Every invocation is one session: the record is loaded from the data
//! directory, the command runs through [`NotesApi`] (which writes the record
//! back), and the returned messages are printed.
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Resolves the data directory, loads config, opens the API
//! - `handle_*()`: Per-command handlers that call the API and print the result

use super::args::{Cli, Commands};
use super::print::{print_full_note, print_messages, print_notes};
use clap::Parser;
use directories::ProjectDirs;
use marknote::api::NotesApi;
use marknote::clipboard::SystemClipboard;
use marknote::config::MarknoteConfig;
use marknote::editor::{edit_content, EditorContent};
use marknote::error::{NoteError, Result};
use marknote::render;
use marknote::state::BufferEdit;
use marknote::store::fs::FileStore;
use marknote::toolbar::Format;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::Level;

/// Overrides the data directory (record and config.json).
const HOME_ENV: &str = "MARKNOTE_HOME";

struct AppContext {
    api: NotesApi<FileStore>,
    config: MarknoteConfig,
    data_dir: PathBuf,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::New {
            title,
            content,
            tags,
        }) => handle_new(&mut ctx, title, content, tags),
        Some(Commands::List { search }) => handle_list(&mut ctx, search),
        Some(Commands::Show { note, html }) => handle_show(&mut ctx, note, html),
        Some(Commands::Edit {
            note,
            title,
            content,
            tags,
        }) => handle_edit(&mut ctx, note, title, content, tags),
        Some(Commands::Delete { note, yes }) => handle_delete(&mut ctx, note, yes),
        Some(Commands::Import { paths }) => handle_import(&mut ctx, paths),
        Some(Commands::Export { note, dir }) => handle_export(&mut ctx, note, dir),
        Some(Commands::Copy { note }) => handle_copy(&mut ctx, note),
        Some(Commands::Format {
            note,
            kind,
            start,
            end,
        }) => handle_format(&mut ctx, note, kind, start, end),
        Some(Commands::Theme) => handle_theme(&mut ctx),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&mut ctx, None),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|h| !h.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "marknote", "marknote")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| NoteError::Api("Could not determine data directory".to_string()))
}

fn init_context() -> Result<AppContext> {
    let data_dir = data_dir()?;
    let config = MarknoteConfig::load(&data_dir).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "invalid config.json, using defaults");
        MarknoteConfig::default()
    });
    tracing::debug!(
        data_dir = %data_dir.display(),
        key = %config.storage_key,
        "opening notes"
    );

    let store = FileStore::new(data_dir.clone());
    let (api, result) = NotesApi::open(store, &config);
    print_messages(&result.messages);

    Ok(AppContext {
        api,
        config,
        data_dir,
    })
}

/// Resolve a reference and make it the current note.
fn select(ctx: &mut AppContext, reference: &str) -> Result<String> {
    let id = ctx.api.resolve(reference)?;
    ctx.api.select_note(&id);
    Ok(id)
}

/// 1-based position of a note in the full list.
fn position_of(ctx: &AppContext, id: &str) -> usize {
    ctx.api.state().position(id).map_or(0, |p| p + 1)
}

fn field_edits(
    title: Option<String>,
    content: Option<String>,
    tags: Option<String>,
) -> Vec<BufferEdit> {
    title
        .map(BufferEdit::Title)
        .into_iter()
        .chain(content.map(BufferEdit::Content))
        .chain(tags.map(BufferEdit::Tags))
        .collect()
}

fn handle_new(
    ctx: &mut AppContext,
    title: Option<String>,
    content: Option<String>,
    tags: Option<String>,
) -> Result<()> {
    let mut result = ctx.api.create_note();

    let edits = field_edits(title, content, tags);
    if !edits.is_empty() {
        let now = Instant::now();
        for edit in edits {
            ctx.api.edit_buffer(edit, now);
        }
        result.merge(ctx.api.save_note());
    }

    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &mut AppContext, search: Option<String>) -> Result<()> {
    let result = ctx.api.set_search_term(search.unwrap_or_default());
    let state = ctx.api.state();
    let rows: Vec<_> = ctx
        .api
        .visible_notes()
        .into_iter()
        .filter_map(|note| state.position(&note.id).map(|p| (p + 1, note)))
        .collect();
    print_notes(&rows);
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &mut AppContext, note: String, html: bool) -> Result<()> {
    let id = select(ctx, &note)?;
    let position = position_of(ctx, &id);
    let current = ctx
        .api
        .current_note()
        .ok_or_else(|| NoteError::NoteNotFound(id.clone()))?;

    if html {
        print!("{}", render::to_html(&current.content));
    } else {
        print_full_note(position, current);
    }
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    note: String,
    title: Option<String>,
    content: Option<String>,
    tags: Option<String>,
) -> Result<()> {
    select(ctx, &note)?;
    ctx.api.toggle_edit();

    let mut edits = field_edits(title, content, tags);
    if edits.is_empty() {
        let initial = EditorContent::from_buffers(&ctx.api.state().buffers);
        let edited = edit_content(&initial)?;
        if edited == initial {
            println!("No changes.");
            return Ok(());
        }
        edits = vec![
            BufferEdit::Title(edited.title),
            BufferEdit::Content(edited.content),
            BufferEdit::Tags(edited.tags),
        ];
    }

    let now = Instant::now();
    for edit in edits {
        ctx.api.edit_buffer(edit, now);
    }
    let result = ctx.api.save_note();
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, note: String, yes: bool) -> Result<()> {
    let id = ctx.api.resolve(&note)?;

    if !yes {
        let title = ctx
            .api
            .state()
            .find(&id)
            .map(|n| n.title.clone())
            .unwrap_or_default();
        if !confirm(&format!("Delete \"{}\"?", title))? {
            println!("Aborted.");
            return Ok(());
        }
    }

    let result = ctx.api.delete_note(&id);
    print_messages(&result.messages);
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn handle_import(ctx: &mut AppContext, paths: Vec<PathBuf>) -> Result<()> {
    let result = ctx.api.import_files(paths, &ctx.config.import_extensions);
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &mut AppContext, note: String, dir: Option<PathBuf>) -> Result<()> {
    let id = ctx.api.resolve(&note)?;
    let dir = match dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let result = ctx.api.export_note(&id, &dir)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_copy(ctx: &mut AppContext, note: String) -> Result<()> {
    select(ctx, &note)?;
    let result = ctx.api.copy_current(&mut SystemClipboard);
    print_messages(&result.messages);
    Ok(())
}

fn handle_format(
    ctx: &mut AppContext,
    note: String,
    kind: String,
    start: usize,
    end: usize,
) -> Result<()> {
    select(ctx, &note)?;
    ctx.api.toggle_edit();

    let insertion = ctx
        .api
        .apply_format(start, end, &kind, Instant::now())
        .ok_or_else(|| {
            let known: Vec<&str> = Format::ALL.iter().map(|f| f.name()).collect();
            NoteError::Api(format!(
                "Unknown format: {} (expected one of {})",
                kind,
                known.join(", ")
            ))
        })?;

    let result = ctx.api.save_note();
    print_messages(&result.messages);
    println!("cursor: {}", insertion.cursor);
    Ok(())
}

fn handle_theme(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.toggle_theme();
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key, value) {
        (None, _) => {
            for key in MarknoteConfig::keys() {
                println!("{} = {}", key, ctx.config.get(key).unwrap_or_default());
            }
        }
        (Some(key), None) => {
            let value = ctx
                .config
                .get(&key)
                .ok_or_else(|| NoteError::Api(format!("Unknown config key: {}", key)))?;
            println!("{} = {}", key, value);
        }
        (Some(key), Some(value)) => {
            ctx.config.set(&key, &value)?;
            ctx.config.save(&ctx.data_dir)?;
            println!("{} = {}", key, ctx.config.get(&key).unwrap_or_default());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_answers() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("no"));
        assert!(!is_yes(""));
    }

    #[test]
    fn field_edits_keep_order_and_skip_missing() {
        let edits = field_edits(Some("T".into()), None, Some("a, b".into()));
        assert_eq!(
            edits,
            vec![
                BufferEdit::Title("T".into()),
                BufferEdit::Tags("a, b".into())
            ]
        );
        assert!(field_edits(None, None, None).is_empty());
    }
}
