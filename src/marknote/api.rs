//! # API Facade
//!
//! [`NotesApi`] is the single entry point for a session. It owns the
//! [`AppState`], the [`NoteRepository`] and the [`Autosave`] controller, and
//! is constructed once by whoever drives the session (the CLI, a test, a GUI).
//!
//! ## Write-Through
//!
//! Commands report the notes they touched in [`CmdResult::affected_notes`].
//! Whenever that list is non-empty, or the theme flips, the facade writes the
//! whole record back before returning. The write always reflects the state the
//! command just committed.
//!
//! A failed write does not roll the state back and does not fail the call:
//! it is logged and returned as an error-level message. The next successful
//! write carries everything.
//!
//! ## Autosave
//!
//! Buffer edits go through [`NotesApi::edit_buffer`], which (re)arms or
//! cancels the debounce. The owner calls [`NotesApi::tick`] with the current
//! time; when the countdown has elapsed the facade saves. Selecting, saving,
//! deleting or leaving edit mode cancels whatever countdown is pending.

use crate::autosave::{Autosave, AutosaveToken};
use crate::clipboard::Clipboard;
use crate::commands::{self, helpers::NoteSelector, CmdMessage, CmdResult};
use crate::config::MarknoteConfig;
use crate::error::Result;
use crate::model::Note;
use crate::repository::NoteRepository;
use crate::shortcuts::{shortcut_for, KeyPress, Shortcut};
use crate::state::{AppState, BufferEdit};
use crate::store::KeyValueStore;
use crate::toolbar::{self, Insertion};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// What a key press did.
#[derive(Debug, Default)]
pub struct KeyOutcome {
    pub shortcut: Option<Shortcut>,
    /// The host should suppress its own handling of the key.
    pub prevent_default: bool,
    pub result: CmdResult,
}

pub struct NotesApi<S: KeyValueStore> {
    state: AppState,
    repo: NoteRepository<S>,
    autosave: Autosave,
}

impl<S: KeyValueStore> NotesApi<S> {
    /// Load the persisted record and build the session.
    ///
    /// A record that cannot be read or parsed is reported in the returned
    /// messages and the session starts empty.
    pub fn open(store: S, config: &MarknoteConfig) -> (Self, CmdResult) {
        Self::open_with(store, &config.storage_key, config.autosave_window())
    }

    pub fn open_with(store: S, key: &str, autosave_window: Duration) -> (Self, CmdResult) {
        let repo = NoteRepository::new(store, key);
        let mut result = CmdResult::default();

        let state = match repo.load() {
            Ok(Some(persisted)) => AppState::from_persisted(persisted),
            Ok(None) => AppState::new(),
            Err(e) => {
                tracing::warn!(key, error = %e, "could not load saved notes");
                result.add_message(CmdMessage::info(
                    "Saved notes could not be loaded; starting with an empty collection",
                ));
                AppState::new()
            }
        };

        let api = Self {
            state,
            repo,
            autosave: Autosave::new(autosave_window),
        };
        (api, result)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &S {
        self.repo.store()
    }

    pub fn autosave(&self) -> &Autosave {
        &self.autosave
    }

    pub fn notes(&self) -> &[Note] {
        &self.state.notes
    }

    pub fn current_note(&self) -> Option<&Note> {
        self.state.current_note()
    }

    /// Notes matching the current search term, in list order.
    pub fn visible_notes(&self) -> Vec<&Note> {
        commands::search::filter(&self.state.notes, &self.state.search_term)
    }

    /// Resolve a user-facing reference (list position or id prefix) to an id.
    pub fn resolve(&self, reference: &str) -> Result<String> {
        let selector: NoteSelector = reference.parse()?;
        commands::helpers::resolve(&self.state, &selector)
    }

    pub fn create_note(&mut self) -> CmdResult {
        self.autosave.cancel();
        let result = commands::create::run(&mut self.state);
        self.write_through(result)
    }

    pub fn select_note(&mut self, id: &str) -> CmdResult {
        self.autosave.cancel();
        commands::select::run(&mut self.state, id)
    }

    /// Apply an edit to one of the buffers and update the autosave countdown.
    pub fn edit_buffer(&mut self, edit: BufferEdit, now: Instant) -> Option<AutosaveToken> {
        self.state.apply_edit(edit);
        if self.state.is_editing && self.state.current_note().is_some() {
            self.autosave.observe(now, self.state.has_pending_changes())
        } else {
            None
        }
    }

    pub fn save_note(&mut self) -> CmdResult {
        self.autosave.cancel();
        let result = commands::save::run(&mut self.state);
        self.write_through(result)
    }

    pub fn delete_note(&mut self, id: &str) -> CmdResult {
        if self.state.current_id() == Some(id) {
            self.autosave.cancel();
        }
        let result = commands::delete::run(&mut self.state, id);
        self.write_through(result)
    }

    pub fn toggle_edit(&mut self) -> CmdResult {
        self.autosave.cancel();
        let result = commands::edit::toggle(&mut self.state);
        self.write_through(result)
    }

    /// Preview visibility is session state and is not persisted.
    pub fn toggle_preview(&mut self) -> CmdResult {
        self.state.show_preview = !self.state.show_preview;
        CmdResult::default()
    }

    pub fn toggle_theme(&mut self) -> CmdResult {
        self.state.is_dark_mode = !self.state.is_dark_mode;
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info(if self.state.is_dark_mode {
            "Dark mode on"
        } else {
            "Dark mode off"
        }));
        self.persist_into(&mut result);
        result
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) -> CmdResult {
        self.state.search_term = term.into();
        commands::search::run(&self.state)
    }

    /// Run the autosave if its countdown has elapsed by `now`.
    pub fn tick(&mut self, now: Instant) -> CmdResult {
        if !self.autosave.poll(now) {
            return CmdResult::default();
        }
        let result = commands::save::run(&mut self.state);
        self.write_through(result)
    }

    /// Import files and directories. Paths that cannot be read become
    /// warnings; everything imported is written through in one go.
    pub fn import_files(&mut self, paths: Vec<PathBuf>, import_exts: &[String]) -> CmdResult {
        self.autosave.cancel();
        let result = commands::import::run(&mut self.state, paths, import_exts);
        self.write_through(result)
    }

    /// Import already-read text, as a file picker hands it over.
    pub fn import_text(&mut self, file_name: &str, text: String) -> CmdResult {
        self.autosave.cancel();
        let result = commands::import::import_text(&mut self.state, file_name, text);
        self.write_through(result)
    }

    pub fn export_note(&self, id: &str, dir: &Path) -> Result<CmdResult> {
        let note = self
            .state
            .find(id)
            .ok_or_else(|| crate::error::NoteError::NoteNotFound(id.to_string()))?;
        commands::export::run(note, dir)
    }

    /// Copy the selected note's content. Failures become a warning message.
    pub fn copy_current<C: Clipboard>(&self, clipboard: &mut C) -> CmdResult {
        let mut result = CmdResult::default();
        let Some(note) = self.state.current_note() else {
            return result;
        };
        match clipboard.copy(&note.content) {
            Ok(()) => result.add_message(CmdMessage::success("Copied to clipboard")),
            Err(e) => {
                tracing::warn!(error = %e, "clipboard copy failed");
                result.add_message(CmdMessage::warning(format!(
                    "Failed to copy to clipboard: {}",
                    e
                )));
            }
        }
        result
    }

    /// Apply a toolbar transform to the content buffer. Returns the new cursor
    /// position, or `None` (buffer untouched) for an unknown kind.
    pub fn apply_format(
        &mut self,
        start: usize,
        end: usize,
        kind: &str,
        now: Instant,
    ) -> Option<Insertion> {
        let insertion = toolbar::apply_named(&self.state.buffers.content, start, end, kind)?;
        self.edit_buffer(BufferEdit::Content(insertion.content.clone()), now);
        Some(insertion)
    }

    /// Dispatch a global keyboard shortcut.
    pub fn handle_key(&mut self, press: KeyPress) -> KeyOutcome {
        let Some(shortcut) = shortcut_for(press) else {
            return KeyOutcome::default();
        };
        tracing::debug!(%shortcut, "shortcut");
        let result = match shortcut {
            Shortcut::NewNote => self.create_note(),
            Shortcut::Save if self.state.is_editing => self.save_note(),
            Shortcut::Save => CmdResult::default(),
            Shortcut::ToggleEdit => self.toggle_edit(),
            Shortcut::TogglePreview => self.toggle_preview(),
        };
        KeyOutcome {
            shortcut: Some(shortcut),
            prevent_default: true,
            result,
        }
    }

    fn write_through(&mut self, mut result: CmdResult) -> CmdResult {
        if !result.affected_notes.is_empty() {
            self.persist_into(&mut result);
        }
        result
    }

    fn persist_into(&mut self, result: &mut CmdResult) {
        if let Err(e) = self
            .repo
            .persist(&self.state.notes, self.state.is_dark_mode)
        {
            tracing::error!(key = self.repo.key(), error = %e, "failed to persist notes");
            result.add_message(CmdMessage::error(format!("Could not save notes: {}", e)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autosave::DEFAULT_QUIESCENCE;
    use crate::commands::MessageLevel;
    use crate::error::NoteError;
    use crate::model::UNTITLED;
    use crate::repository::DEFAULT_STORAGE_KEY;
    use crate::store::memory::InMemoryStore;

    fn api() -> NotesApi<InMemoryStore> {
        NotesApi::open_with(InMemoryStore::new(), DEFAULT_STORAGE_KEY, DEFAULT_QUIESCENCE).0
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    struct FailingClipboard;

    impl Clipboard for FailingClipboard {
        fn copy(&mut self, _text: &str) -> Result<()> {
            Err(NoteError::Clipboard("permission denied".into()))
        }
    }

    #[derive(Default)]
    struct RecordingClipboard(Vec<String>);

    impl Clipboard for RecordingClipboard {
        fn copy(&mut self, text: &str) -> Result<()> {
            self.0.push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn open_without_record_starts_empty() {
        let (api, result) =
            NotesApi::open_with(InMemoryStore::new(), DEFAULT_STORAGE_KEY, DEFAULT_QUIESCENCE);
        assert!(api.notes().is_empty());
        assert!(!api.state().is_dark_mode);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn open_with_corrupt_record_recovers() {
        let store = InMemoryStore::with_entry(DEFAULT_STORAGE_KEY, "[[[");
        let (api, result) = NotesApi::open_with(store, DEFAULT_STORAGE_KEY, DEFAULT_QUIESCENCE);

        assert!(api.notes().is_empty());
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }

    #[test]
    fn create_writes_through() {
        let mut api = api();
        api.create_note();
        assert_eq!(api.store().write_count(), 1);

        let raw = api.store().get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        assert!(raw.contains(&api.notes()[0].id));
    }

    #[test]
    fn reopen_restores_notes_and_theme() {
        let mut api = api();
        api.create_note();
        api.edit_buffer(BufferEdit::Tags("a, b".into()), Instant::now());
        api.save_note();
        api.toggle_theme();
        let saved = api.notes().to_vec();

        let raw = api.store().get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        let (reopened, _) = NotesApi::open_with(
            InMemoryStore::with_entry(DEFAULT_STORAGE_KEY, &raw),
            DEFAULT_STORAGE_KEY,
            DEFAULT_QUIESCENCE,
        );
        assert_eq!(reopened.notes(), saved.as_slice());
        assert!(reopened.state().is_dark_mode);
        assert!(reopened.current_note().is_none());
    }

    #[test]
    fn save_persists_and_confirms() {
        let mut api = api();
        api.create_note();
        api.edit_buffer(BufferEdit::Title("".into()), Instant::now());

        let result = api.save_note();

        assert_eq!(api.current_note().unwrap().title, UNTITLED);
        assert_eq!(api.store().write_count(), 2);
        assert!(result.has_level(MessageLevel::Success));
    }

    #[test]
    fn save_without_selection_does_not_write() {
        let mut api = api();
        let result = api.save_note();
        assert!(result.messages.is_empty());
        assert_eq!(api.store().write_count(), 0);
    }

    #[test]
    fn delete_unknown_id_does_not_write() {
        let mut api = api();
        api.create_note();
        let result = api.delete_note("missing");
        assert!(result.messages.is_empty());
        assert_eq!(api.store().write_count(), 1);
    }

    #[test]
    fn delete_selected_clears_selection_and_writes() {
        let mut api = api();
        let id = api.create_note().affected_notes[0].id.clone();
        api.delete_note(&id);
        assert!(api.current_note().is_none());
        assert!(api.notes().is_empty());
        assert_eq!(api.store().write_count(), 2);
    }

    #[test]
    fn write_failure_keeps_state_and_reports_error() {
        let mut api = api();
        api.store().set_simulate_write_error(true);

        let result = api.create_note();

        assert_eq!(api.notes().len(), 1);
        assert!(result.has_level(MessageLevel::Error));
        assert!(result
            .messages
            .iter()
            .any(|m| m.content.contains("Could not save notes")));
    }

    #[test]
    fn preview_toggle_is_not_persisted() {
        let mut api = api();
        api.toggle_preview();
        assert!(!api.state().show_preview);
        assert_eq!(api.store().write_count(), 0);
    }

    #[test]
    fn theme_toggle_is_persisted() {
        let mut api = api();
        api.toggle_theme();
        api.toggle_theme();
        assert_eq!(api.store().write_count(), 2);
        assert!(!api.state().is_dark_mode);
    }

    #[test]
    fn autosave_fires_once_from_last_edit() {
        let mut api = api();
        api.create_note();
        let t0 = Instant::now();

        api.edit_buffer(BufferEdit::Content("first".into()), t0);
        api.edit_buffer(BufferEdit::Content("second".into()), t0 + ms(500));

        assert!(api.tick(t0 + ms(1000)).affected_notes.is_empty());
        assert!(api.tick(t0 + ms(1499)).affected_notes.is_empty());
        let fired = api.tick(t0 + ms(1500));
        assert_eq!(fired.affected_notes.len(), 1);
        assert!(api.tick(t0 + ms(3000)).affected_notes.is_empty());

        assert_eq!(api.current_note().unwrap().content, "second");
        assert!(!api.state().is_editing);
        // create + one autosave
        assert_eq!(api.store().write_count(), 2);
    }

    #[test]
    fn tag_only_edit_does_not_arm_autosave() {
        let mut api = api();
        api.create_note();
        let t0 = Instant::now();
        assert!(api.edit_buffer(BufferEdit::Tags("x".into()), t0).is_none());
        assert!(api.tick(t0 + ms(5000)).affected_notes.is_empty());

        // ...but tags ride along with the next save
        api.save_note();
        assert_eq!(api.current_note().unwrap().tags, vec!["x"]);
    }

    #[test]
    fn edits_outside_edit_mode_do_not_arm() {
        let mut api = api();
        let id = api.create_note().affected_notes[0].id.clone();
        api.select_note(&id);
        assert!(api
            .edit_buffer(BufferEdit::Title("x".into()), Instant::now())
            .is_none());
        assert!(!api.autosave().is_pending());
    }

    #[test]
    fn selecting_cancels_pending_autosave() {
        let mut api = api();
        let first = api.create_note().affected_notes[0].id.clone();
        api.create_note();
        let t0 = Instant::now();
        api.edit_buffer(BufferEdit::Title("draft".into()), t0);

        api.select_note(&first);

        assert!(api.tick(t0 + ms(2000)).affected_notes.is_empty());
        assert!(api.notes().iter().all(|n| n.title != "draft"));
    }

    #[test]
    fn manual_save_cancels_autosave() {
        let mut api = api();
        api.create_note();
        let t0 = Instant::now();
        api.edit_buffer(BufferEdit::Title("T".into()), t0);
        api.save_note();
        assert!(!api.autosave().is_pending());
        assert!(api.tick(t0 + ms(2000)).affected_notes.is_empty());
    }

    #[test]
    fn copy_failure_is_a_warning() {
        let mut api = api();
        api.create_note();
        let result = api.copy_current(&mut FailingClipboard);
        assert!(result.has_level(MessageLevel::Warning));
    }

    #[test]
    fn copy_writes_raw_content() {
        let mut api = api();
        api.create_note();
        let mut clipboard = RecordingClipboard::default();
        api.copy_current(&mut clipboard);
        assert_eq!(clipboard.0, vec![api.current_note().unwrap().content.clone()]);
    }

    #[test]
    fn copy_without_selection_does_nothing() {
        let api = api();
        let mut clipboard = RecordingClipboard::default();
        assert!(api.copy_current(&mut clipboard).messages.is_empty());
        assert!(clipboard.0.is_empty());
    }

    #[test]
    fn format_edits_content_buffer_and_arms_autosave() {
        let mut api = api();
        api.create_note();
        let now = Instant::now();
        api.edit_buffer(BufferEdit::Content("hello world".into()), now);

        let insertion = api.apply_format(0, 5, "bold", now).unwrap();

        assert_eq!(insertion.cursor, 9);
        assert_eq!(api.state().buffers.content, "**hello** world");
        assert!(api.autosave().is_pending());
    }

    #[test]
    fn unknown_format_leaves_buffer() {
        let mut api = api();
        api.create_note();
        let before = api.state().buffers.content.clone();
        assert!(api.apply_format(0, 3, "underline", Instant::now()).is_none());
        assert_eq!(api.state().buffers.content, before);
    }

    #[test]
    fn shortcuts_dispatch() {
        let mut api = api();
        let now = Instant::now();

        let outcome = api.handle_key(KeyPress::ctrl('n'));
        assert!(outcome.prevent_default);
        assert_eq!(api.notes().len(), 1);
        assert!(api.state().is_editing);

        api.edit_buffer(BufferEdit::Title("Via shortcut".into()), now);
        api.handle_key(KeyPress::cmd('s'));
        assert_eq!(api.current_note().unwrap().title, "Via shortcut");
        assert!(!api.state().is_editing);

        // Save outside edit mode is swallowed
        let writes = api.store().write_count();
        let outcome = api.handle_key(KeyPress::ctrl('s'));
        assert!(outcome.prevent_default);
        assert_eq!(api.store().write_count(), writes);

        api.handle_key(KeyPress::ctrl('e'));
        assert!(api.state().is_editing);

        api.handle_key(KeyPress::ctrl('p'));
        assert!(!api.state().show_preview);

        let outcome = api.handle_key(KeyPress::plain('n'));
        assert!(!outcome.prevent_default);
        assert_eq!(api.notes().len(), 1);
    }

    #[test]
    fn search_filters_visible_notes() {
        let mut api = api();
        api.create_note();
        api.edit_buffer(BufferEdit::Title("Groceries".into()), Instant::now());
        api.save_note();
        api.create_note();

        let result = api.set_search_term("GROC");
        assert_eq!(result.listed_notes.len(), 1);
        assert_eq!(api.visible_notes().len(), 1);

        api.set_search_term("");
        assert_eq!(api.visible_notes().len(), 2);
    }

    #[test]
    fn import_text_writes_through() {
        let mut api = api();
        api.import_text("journal.md", "today".into());
        assert_eq!(api.current_note().unwrap().title, "journal");
        assert_eq!(api.store().write_count(), 1);
    }

    #[test]
    fn import_files_persists_despite_unreadable_directory() {
        let temp = tempfile::tempdir().unwrap();
        let note_file = temp.path().join("a.md");
        std::fs::write(&note_file, "alpha").unwrap();
        let mut paths = vec![note_file];
        #[cfg(unix)]
        paths.extend(crate::commands::import::unreadable_dir(temp.path()));

        let mut api = api();
        let result = api.import_files(paths, &[".md".to_string()]);

        assert_eq!(api.notes().len(), 1);
        assert_eq!(api.store().write_count(), 1);
        let raw = api.store().get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        assert!(raw.contains(&api.notes()[0].id));
        assert!(result
            .messages
            .iter()
            .any(|m| m.content.contains("Total imported: 1")));
    }

    #[test]
    fn export_unknown_note_fails() {
        let api = api();
        let temp = tempfile::tempdir().unwrap();
        assert!(matches!(
            api.export_note("nope", temp.path()),
            Err(NoteError::NoteNotFound(_))
        ));
    }

    #[test]
    fn resolve_by_index_and_prefix() {
        let mut api = api();
        let id = api.create_note().affected_notes[0].id.clone();
        assert_eq!(api.resolve("1").unwrap(), id);
        // Nine characters reach the first hyphen, so the prefix never parses as a number
        assert_eq!(api.resolve(&id[..9]).unwrap(), id);
        assert!(api.resolve("2").is_err());
    }

    #[test]
    fn invariants_hold_over_mixed_operations() {
        let mut api = api();
        let t0 = Instant::now();
        for i in 0..20u64 {
            match i % 5 {
                0 | 1 => {
                    api.create_note();
                }
                2 => {
                    api.edit_buffer(BufferEdit::Title(format!("n{}", i)), t0 + ms(i * 10));
                    api.save_note();
                }
                3 => {
                    if let Some(id) = api.notes().last().map(|n| n.id.clone()) {
                        api.select_note(&id);
                        api.toggle_edit();
                    }
                }
                _ => {
                    if let Some(id) = api.notes().get(1).map(|n| n.id.clone()) {
                        api.delete_note(&id);
                    }
                }
            }
            let mut ids: Vec<&str> = api.notes().iter().map(|n| n.id.as_str()).collect();
            let total = ids.len();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), total);
            assert!(api.notes().iter().all(|n| n.updated_at >= n.created_at));
        }
    }
}
