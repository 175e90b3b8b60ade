use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NoteError, Result};
use crate::model::Note;
use std::fs;
use std::path::Path;

/// Write the note's raw content to `<title>.md` inside `dir`.
pub fn run(note: &Note, dir: &Path) -> Result<CmdResult> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(NoteError::Io)?;
    }
    let path = dir.join(export_filename(&note.title));
    fs::write(&path, &note.content).map_err(NoteError::Io)?;

    let mut result = CmdResult::default().with_paths(vec![path.clone()]);
    result.add_message(CmdMessage::success(format!(
        "Exported to {}",
        path.display()
    )));
    Ok(result)
}

/// `<title>.md`, with path separators swapped out so the file stays in `dir`.
pub fn export_filename(title: &str) -> String {
    let safe: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect();
    format!("{}.md", safe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_is_title_with_md() {
        assert_eq!(export_filename("Meeting notes"), "Meeting notes.md");
        assert_eq!(export_filename("a/b\\c"), "a_b_c.md");
    }

    #[test]
    fn writes_raw_content() {
        let temp = tempfile::tempdir().unwrap();
        let note = Note::new("Plan", "# Plan\n\n- step");

        let result = run(&note, temp.path()).unwrap();

        let path = temp.path().join("Plan.md");
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Plan\n\n- step");
        assert_eq!(result.paths, vec![path]);
        assert!(result.messages[0].content.contains("Exported to"));
    }

    #[test]
    fn creates_missing_directory() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("out");
        run(&Note::new("X", "x"), &dir).unwrap();
        assert!(dir.join("X.md").exists());
    }
}
