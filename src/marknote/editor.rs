use crate::error::{NoteError, Result};
use crate::state::EditBuffers;
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;
use uuid::Uuid;

const TAGS_PREFIX: &str = "tags:";

/// The edit buffers as laid out in an external editor.
///
/// ```text
/// Title line
/// tags: a, b
///
/// content...
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorContent {
    pub title: String,
    pub tags: String,
    pub content: String,
}

impl EditorContent {
    pub fn new(title: String, tags: String, content: String) -> Self {
        Self {
            title,
            tags,
            content,
        }
    }

    pub fn from_buffers(buffers: &EditBuffers) -> Self {
        Self::new(
            buffers.title.clone(),
            buffers.tags.clone(),
            buffers.content.clone(),
        )
    }

    pub fn to_buffer(&self) -> String {
        format!(
            "{}\n{} {}\n\n{}",
            self.title, TAGS_PREFIX, self.tags, self.content
        )
    }

    /// Parses an editor buffer back. The tags line is optional; one blank line
    /// after the header is dropped and the rest is content, kept verbatim.
    pub fn from_buffer(buffer: &str) -> Self {
        let mut rest = buffer;
        let title = take_line(&mut rest).trim().to_string();

        let mut tags = String::new();
        let mut lookahead = rest;
        let line = take_line(&mut lookahead);
        if line
            .get(..TAGS_PREFIX.len())
            .is_some_and(|p| p.eq_ignore_ascii_case(TAGS_PREFIX))
        {
            tags = line[TAGS_PREFIX.len()..].trim().to_string();
            rest = lookahead;
        }

        let mut lookahead = rest;
        if take_line(&mut lookahead).trim().is_empty() && rest.contains('\n') {
            rest = lookahead;
        } else if rest.trim().is_empty() {
            rest = "";
        }

        Self {
            title,
            tags,
            content: rest.to_string(),
        }
    }
}

fn take_line<'a>(rest: &mut &'a str) -> &'a str {
    match rest.find('\n') {
        Some(i) => {
            let line = &rest[..i];
            *rest = &rest[i + 1..];
            line.strip_suffix('\r').unwrap_or(line)
        }
        None => {
            let line = *rest;
            *rest = "";
            line
        }
    }
}

/// Gets the editor command from environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(NoteError::Api(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in the user's editor and waits for it to close.
/// Returns the contents of the file after editing.
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();

    let status = Command::new(&editor)
        .arg(path)
        .status()
        .map_err(|e| NoteError::Api(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(NoteError::Api(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    fs::read_to_string(path).map_err(NoteError::Io)
}

/// Opens an editor on the given content in a temporary `.md` file and returns
/// what the user saved.
pub fn edit_content(initial: &EditorContent) -> Result<EditorContent> {
    let temp_file = env::temp_dir().join(format!("marknote-{}.md", Uuid::new_v4()));
    fs::write(&temp_file, initial.to_buffer()).map_err(NoteError::Io)?;

    let result = open_in_editor(&temp_file);
    let _ = fs::remove_file(&temp_file);

    Ok(EditorContent::from_buffer(&result?))
}
