use crate::commands::{create, CmdMessage, CmdResult};
use crate::error::{NoteError, Result};
use crate::model::{Note, UNTITLED};
use crate::state::AppState;
use std::fs;
use std::path::{Path, PathBuf};

/// Import files (or every matching file inside a directory) as new notes.
///
/// Each imported note is prepended and selected in turn, so the last one
/// imported ends up selected and in edit mode. Missing paths, unreadable
/// directories and unreadable files are reported as warnings and skipped;
/// whatever was imported before a failure stays imported.
pub fn run(state: &mut AppState, paths: Vec<PathBuf>, import_exts: &[String]) -> CmdResult {
    let mut result = CmdResult::default();
    let mut imported_count = 0;

    for path in paths {
        if path.is_dir() {
            match dir_files(&path, import_exts) {
                Ok(files) => {
                    for file in files {
                        imported_count += import_path(state, &file, &mut result);
                    }
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "import failed");
                    result.add_message(CmdMessage::warning(format!(
                        "Failed to read directory {}: {}",
                        path.display(),
                        e
                    )));
                }
            }
        } else if path.is_file() {
            imported_count += import_path(state, &path, &mut result);
        } else {
            result.add_message(CmdMessage::warning(format!(
                "Path not found: {}",
                path.display()
            )));
        }
    }

    result.add_message(CmdMessage::success(format!(
        "Total imported: {}",
        imported_count
    )));
    result
}

/// Files directly inside `dir` carrying one of the import extensions, sorted.
fn dir_files(dir: &Path, import_exts: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(NoteError::Io)? {
        let path = entry.map_err(NoteError::Io)?.path();
        if path.is_file() && has_import_ext(&path, import_exts) {
            files.push(path);
        }
    }
    // read_dir order is platform dependent
    files.sort();
    Ok(files)
}

fn import_path(state: &mut AppState, path: &Path, result: &mut CmdResult) -> usize {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match fs::read_to_string(path) {
        Ok(text) => {
            result.merge(import_text(state, &file_name, text));
            1
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "import failed");
            result.add_message(CmdMessage::warning(format!(
                "Failed to import {}: {}",
                path.display(),
                e
            )));
            0
        }
    }
}

/// Create a note from a file's name and full text. Tags start empty.
pub fn import_text(state: &mut AppState, file_name: &str, text: String) -> CmdResult {
    let note = Note::new(title_from_filename(file_name), text);
    create::insert(state, note, "Note imported")
}

/// Removes the first literal `.md` from the file name, wherever it occurs.
///
/// `notes.md` becomes `notes`, but `my.md.notes.txt` becomes `my.notes.txt`
/// and `x.mdown` becomes `xown`. Existing imports were
/// titled this way, so the rule is kept as is.
pub fn title_from_filename(file_name: &str) -> String {
    let title = file_name.replacen(".md", "", 1);
    if title.trim().is_empty() {
        UNTITLED.to_string()
    } else {
        title
    }
}

fn has_import_ext(path: &Path, import_exts: &[String]) -> bool {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .is_some_and(|ext| {
            import_exts
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(&ext))
        })
}

/// A directory whose listing fails for the current user, if one can be found.
#[cfg(all(test, unix))]
pub(crate) fn unreadable_dir(parent: &Path) -> Option<PathBuf> {
    use std::os::unix::fs::PermissionsExt;

    let proc_dir = PathBuf::from("/proc/1/map_files");
    if proc_dir.is_dir() && fs::read_dir(&proc_dir).is_err() {
        return Some(proc_dir);
    }
    let locked = parent.join("locked");
    fs::create_dir(&locked).ok()?;
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).ok()?;
    if fs::read_dir(&locked).is_err() {
        Some(locked)
    } else {
        None
    }
}
