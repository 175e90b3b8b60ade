//! # Marknote Architecture
//!
//! Marknote is a **UI-agnostic markdown note library**. It keeps a collection of
//! notes (title, markdown body, tags, timestamps) together with a theme flag,
//! mirrors both into a key-value store after every change, and exposes the
//! note lifecycle, search, an editing toolbar, keyboard shortcuts and `.md`
//! import/export. The bundled CLI is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the session: state, repository, autosave            │
//! │  - Writes the record through after every change             │
//! │  - Dispatches keyboard shortcuts and toolbar transforms     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure state transitions over AppState                     │
//! │  - Return CmdResult (affected notes + messages)             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Persistence (repository.rs, store/)                        │
//! │  - One JSON record under one key                            │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes plain arguments and returns plain Rust
//! types. It never prints and never exits. Time is passed in (`Instant`) so the
//! autosave debounce can be driven by any event loop, or by a test.
//!
//! ## Module Overview
//!
//! - [`api`]: The session facade, entry point for all operations
//! - [`commands`]: State transitions for each operation
//! - [`state`]: The session state container and edit buffers
//! - [`model`]: The `Note` type and its normalization rules
//! - [`repository`]: The persisted record and its (de)serialization
//! - [`store`]: Key-value storage abstraction and implementations
//! - [`autosave`]: Debounce controller for saving after a quiet period
//! - [`toolbar`]: Markdown formatting transforms over a selection
//! - [`shortcuts`]: Keyboard shortcut mapping
//! - [`render`]: Markdown to HTML preview
//! - [`config`]: Configuration management
//! - [`editor`]: External editor integration
//! - [`clipboard`]: Cross-platform clipboard support
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod autosave;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod model;
pub mod render;
pub mod repository;
pub mod shortcuts;
pub mod state;
pub mod store;
pub mod toolbar;
