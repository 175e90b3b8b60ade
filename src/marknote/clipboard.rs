use crate::error::{NoteError, Result};
use std::io::Write;
use std::process::{Command, Stdio};

/// Destination for the copy operation.
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// The platform clipboard, reached through its command-line tool.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        copy_to_clipboard(text)
    }
}

/// Copies text to the system clipboard in an OS-specific way.
/// - macOS: uses pbcopy
/// - Linux: uses xclip or xsel
/// - Windows: uses clip.exe
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        pipe_to(Command::new("pbcopy"), "pbcopy", text)
    }

    #[cfg(target_os = "linux")]
    {
        let mut xclip = Command::new("xclip");
        xclip.args(["-selection", "clipboard"]);
        match pipe_to(xclip, "xclip", text) {
            Ok(()) => Ok(()),
            Err(first) => {
                let mut xsel = Command::new("xsel");
                xsel.args(["--clipboard", "--input"]);
                pipe_to(xsel, "xsel", text).map_err(|_| {
                    NoteError::Clipboard(format!("{}. Install xclip or xsel.", first))
                })
            }
        }
    }

    #[cfg(target_os = "windows")]
    {
        pipe_to(Command::new("clip"), "clip", text)
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        let _ = text;
        Err(NoteError::Clipboard(
            "Clipboard not supported on this platform".to_string(),
        ))
    }
}

#[allow(dead_code)]
fn pipe_to(mut command: Command, name: &str, text: &str) -> Result<()> {
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| NoteError::Clipboard(format!("Failed to spawn {}: {}", name, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| NoteError::Clipboard(format!("Failed to write to {}: {}", name, e)))?;
    }

    let status = child
        .wait()
        .map_err(|e| NoteError::Clipboard(format!("Failed to wait for {}: {}", name, e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(NoteError::Clipboard(format!("{} exited with error", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn pipe_to_reports_missing_program() {
        let err = pipe_to(
            Command::new("marknote-no-such-clipboard-tool"),
            "nothing",
            "text",
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to spawn nothing"));
    }

    #[cfg(unix)]
    #[test]
    fn pipe_to_succeeds_with_cat() {
        assert!(pipe_to(Command::new("cat"), "cat", "hello").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn pipe_to_reports_failing_exit() {
        let err = pipe_to(Command::new("false"), "false", "").unwrap_err();
        assert!(err.to_string().contains("exited with error"));
    }
}
