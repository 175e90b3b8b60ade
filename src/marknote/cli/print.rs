use chrono::{DateTime, Utc};
use colored::Colorize;
use marknote::commands::{CmdMessage, MessageLevel};
use marknote::model::Note;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const PREVIEW_CHARS: usize = 50;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

/// One line per note: position, title, content preview, last update.
/// Positions are the note's place in the full collection, so they stay valid
/// as references while a search filter is active.
pub(super) fn print_notes(notes: &[(usize, &Note)]) {
    if notes.is_empty() {
        println!("No notes found.");
        return;
    }

    for (position, note) in notes {
        println!("{}", format_note_line(*position, note));
    }
}

fn format_note_line(position: usize, note: &Note) -> String {
    let idx_str = format!("{}. ", position);
    let tags = if note.tags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", note.tags_line())
    };

    let content_preview: String = note
        .content
        .chars()
        .take(PREVIEW_CHARS)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();
    let title_content = if content_preview.is_empty() {
        format!("{}{}", note.title, tags)
    } else {
        format!("{}{} {}", note.title, tags, content_preview)
    };

    let fixed_width = 2 + idx_str.width() + TIME_WIDTH;
    let available = LINE_WIDTH.saturating_sub(fixed_width);
    let title_display = truncate_to_width(&title_content, available);
    let padding = available.saturating_sub(title_display.width());

    format!(
        "  {}{}{}{}",
        idx_str.yellow(),
        title_display,
        " ".repeat(padding),
        format_time_ago(note.updated_at).dimmed()
    )
}

pub(super) fn print_full_note(position: usize, note: &Note) {
    println!("{} {}", format!("{}.", position).yellow(), note.title.bold());
    if !note.tags.is_empty() {
        println!("{}", format!("tags: {}", note.tags_line()).dimmed());
    }
    println!("--------------------------------");
    println!("{}", note.content);
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
