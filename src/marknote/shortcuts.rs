use std::fmt;

/// Global keyboard shortcuts. All of them need Ctrl (or Cmd on macOS).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    NewNote,
    Save,
    ToggleEdit,
    TogglePreview,
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Shortcut::NewNote => "new note",
            Shortcut::Save => "save",
            Shortcut::ToggleEdit => "toggle edit",
            Shortcut::TogglePreview => "toggle preview",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyPress {
    pub key: char,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyPress {
    pub fn ctrl(key: char) -> Self {
        Self {
            key,
            ctrl: true,
            meta: false,
        }
    }

    pub fn cmd(key: char) -> Self {
        Self {
            key,
            ctrl: false,
            meta: true,
        }
    }

    pub fn plain(key: char) -> Self {
        Self {
            key,
            ..Self::default()
        }
    }
}

/// Map a key press to a shortcut. Without a modifier nothing matches.
pub fn shortcut_for(press: KeyPress) -> Option<Shortcut> {
    if !(press.ctrl || press.meta) {
        return None;
    }
    match press.key.to_ascii_lowercase() {
        'n' => Some(Shortcut::NewNote),
        's' => Some(Shortcut::Save),
        'e' => Some(Shortcut::ToggleEdit),
        'p' => Some(Shortcut::TogglePreview),
        _ => None,
    }
}
