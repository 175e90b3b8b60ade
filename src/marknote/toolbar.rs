//! Markdown toolbar transforms.
//!
//! Wraps or prefixes the selected range of the content buffer with markdown
//! syntax. With an empty selection a per-kind placeholder is inserted instead.
//! Offsets are character offsets, not bytes.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Bold,
    Italic,
    Code,
    Link,
    Header,
    ListItem,
}

impl Format {
    pub const ALL: [Format; 6] = [
        Format::Bold,
        Format::Italic,
        Format::Code,
        Format::Link,
        Format::Header,
        Format::ListItem,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Format::Bold => "bold",
            Format::Italic => "italic",
            Format::Code => "code",
            Format::Link => "link",
            Format::Header => "header",
            Format::ListItem => "list",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            Format::Bold => "bold text",
            Format::Italic => "italic text",
            Format::Code => "code",
            Format::Link => "link text",
            Format::Header => "Header",
            Format::ListItem => "List item",
        }
    }

    fn wrap(self, text: &str) -> String {
        match self {
            Format::Bold => format!("**{}**", text),
            Format::Italic => format!("*{}*", text),
            Format::Code => format!("`{}`", text),
            Format::Link => format!("[{}](url)", text),
            Format::Header => format!("# {}", text),
            Format::ListItem => format!("- {}", text),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bold" => Ok(Format::Bold),
            "italic" => Ok(Format::Italic),
            "code" => Ok(Format::Code),
            "link" => Ok(Format::Link),
            "header" | "heading" => Ok(Format::Header),
            "list" | "list-item" => Ok(Format::ListItem),
            other => Err(format!("Unknown format: {}", other)),
        }
    }
}

/// Result of a transform: the new buffer and where the cursor goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub content: String,
    /// Character offset right after the inserted fragment.
    pub cursor: usize,
}

/// Splice the formatted selection `[start, end)` back into `content`.
///
/// Offsets past the end are clamped and reversed offsets are swapped.
pub fn apply(content: &str, start: usize, end: usize, format: Format) -> Insertion {
    let len = content.chars().count();
    let (start, end) = (start.min(end).min(len), start.max(end).min(len));

    let start_byte = byte_offset(content, start);
    let end_byte = byte_offset(content, end);
    let selected = &content[start_byte..end_byte];
    let text = if selected.is_empty() {
        format.placeholder()
    } else {
        selected
    };
    let fragment = format.wrap(text);

    let mut new_content = String::with_capacity(content.len() + fragment.len());
    new_content.push_str(&content[..start_byte]);
    new_content.push_str(&fragment);
    new_content.push_str(&content[end_byte..]);

    Insertion {
        content: new_content,
        cursor: start + fragment.chars().count(),
    }
}

/// Like [`apply`] but takes the kind by name. Unknown kinds yield `None` and
/// the buffer should be left as it is.
pub fn apply_named(content: &str, start: usize, end: usize, kind: &str) -> Option<Insertion> {
    kind.parse::<Format>()
        .ok()
        .map(|format| apply(content, start, end, format))
}

fn byte_offset(s: &str, char_offset: usize) -> usize {
    s.char_indices()
        .nth(char_offset)
        .map(|(byte, _)| byte)
        .unwrap_or(s.len())
}
