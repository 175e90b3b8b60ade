//! # Command Layer
//!
//! This module contains the **core business logic** of marknote. Each command
//! lives in its own submodule and is a plain function over [`AppState`].
//!
//! ## Role and Responsibilities
//!
//! Commands:
//! - Implement the state transitions (create, select, save, delete, ...)
//! - Return a structured [`CmdResult`] with affected notes and messages
//! - Are completely UI-agnostic
//!
//! ## What Commands Do NOT Do
//!
//! - **Persistence**: The API facade writes through after a command reports
//!   affected notes. Commands never touch the store.
//! - **Terminal I/O**: No stdout, stderr, prompts or exit codes.
//!
//! ## Structured Returns
//!
//! [`CmdResult::affected_notes`] lists the notes a command committed or
//! removed. An empty list means the collection did not change, which is how
//! the facade decides whether a persistence write is due.
//!
//! ## Command Modules
//!
//! - [`create`]: Create a new note and start editing it
//! - [`select`]: Select a note and load the edit buffers
//! - [`save`]: Commit the edit buffers into the selected note
//! - [`delete`]: Remove a note
//! - [`edit`]: Toggle edit mode (saving on the way out)
//! - [`search`]: Filter notes by a term
//! - [`import`]: Create a note from a text file
//! - [`export`]: Write a note to `<title>.md`
//! - [`helpers`]: Resolve user-facing note references

use crate::model::Note;
use serde::Serialize;
use std::path::PathBuf;

pub mod create;
pub mod delete;
pub mod edit;
pub mod export;
pub mod helpers;
pub mod import;
pub mod save;
pub mod search;
pub mod select;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_notes: Vec<Note>,
    pub listed_notes: Vec<Note>,
    pub paths: Vec<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_notes(mut self, notes: Vec<Note>) -> Self {
        self.affected_notes = notes;
        self
    }

    pub fn with_listed_notes(mut self, notes: Vec<Note>) -> Self {
        self.listed_notes = notes;
        self
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }

    /// Fold another result into this one, keeping message order.
    pub fn merge(&mut self, other: CmdResult) {
        self.affected_notes.extend(other.affected_notes);
        self.listed_notes.extend(other.listed_notes);
        self.paths.extend(other.paths);
        self.messages.extend(other.messages);
    }

    pub fn has_level(&self, level: MessageLevel) -> bool {
        self.messages.iter().any(|m| m.level == level)
    }
}
