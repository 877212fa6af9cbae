use colored::Colorize;
use serde::Serialize;

use super::OutputFormat;
use crate::domain::entities::{Commit, Entry, Lock, LogEntry};
use crate::domain::value_objects::NodeKind;

/// Render `value` as JSON or YAML, or as text through `text`
pub fn render<T, F>(value: &T, format: OutputFormat, text: F) -> anyhow::Result<String>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(value)?)),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        OutputFormat::Text => Ok(text(value)),
    }
}

/// One line per entry: kind, last-changed revision, author, size, lock flag, name
pub fn entries_text(entries: &[Entry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let revision = entry
            .last_changed_revision
            .map(|revision| revision.to_string())
            .unwrap_or_default();
        let author = entry
            .commit
            .as_ref()
            .and_then(|commit| commit.author.clone())
            .unwrap_or_default();
        let size = entry.size.map(|size| size.to_string()).unwrap_or_default();
        let lock = if entry.is_locked() { "L".yellow().bold() } else { " ".normal() };
        let name = match entry.kind {
            NodeKind::Dir => format!("{}/", entry.name).blue().bold(),
            _ => entry.name.normal(),
        };
        out.push_str(&format!(
            "{:>7} {:<12} {:>10} {} {}",
            revision, author, size, lock, name
        ));
        if let Some(mime_type) = &entry.mime_type {
            out.push_str(&format!("  {}", mime_type.dimmed()));
        }
        out.push('\n');
    }
    out
}

/// `key: value` lines for a single node
pub fn entry_text(entry: &Entry) -> String {
    let mut lines = vec![
        format!("{}: {}", "Path".bold(), entry.path),
        format!("{}: {}", "URL".bold(), entry.full_path),
        format!("{}: {}", "Kind".bold(), entry.kind),
        format!("{}: {}", "Revision".bold(), entry.head_revision),
    ];
    if let Some(commit) = &entry.commit {
        lines.push(format!("{}: {}", "Last Changed Rev".bold(), commit.revision));
        if let Some(author) = &commit.author {
            lines.push(format!("{}: {}", "Last Changed Author".bold(), author));
        }
        if let Some(date) = commit.date {
            lines.push(format!("{}: {}", "Last Changed Date".bold(), date.to_rfc3339()));
        }
    }
    if let Some(mime_type) = &entry.mime_type {
        lines.push(format!("{}: {}", "MIME Type".bold(), mime_type));
    }
    if let Some(lock) = &entry.lock {
        lines.push(lock_lines(lock));
    }
    lines.join("\n") + "\n"
}

/// Header line and message of a commit, or a note that there is none
pub fn commit_text(commit: &Option<Commit>) -> String {
    let Some(commit) = commit else {
        return format!("{}\n", "no commit".dimmed());
    };
    let mut out = format!(
        "{} | {} | {}\n",
        format!("r{}", commit.revision).green().bold(),
        commit.author.as_deref().unwrap_or("(no author)"),
        commit
            .date
            .map(|date| date.to_rfc3339())
            .unwrap_or_else(|| "(no date)".to_string())
    );
    if let Some(message) = &commit.message {
        out.push('\n');
        out.push_str(message.trim_end());
        out.push('\n');
    }
    out
}

/// Lock details, or a note that the path is not locked
pub fn lock_text(lock: &Option<Lock>) -> String {
    match lock {
        Some(lock) => lock_lines(lock) + "\n",
        None => format!("{}\n", "not locked".dimmed()),
    }
}

fn lock_lines(lock: &Lock) -> String {
    let mut lines = vec![
        format!("{}: {}", "Lock Owner".bold(), lock.owner),
        format!("{}: {}", "Lock Token".bold(), lock.token),
        format!("{}: {}", "Lock Created".bold(), lock.created.to_rfc3339()),
    ];
    if let Some(comment) = &lock.comment {
        lines.push(format!("{}: {}", "Lock Comment".bold(), comment));
    }
    lines.join("\n")
}

pub fn log_text(entries: &[LogEntry]) -> String {
    let separator = "-".repeat(72);
    let mut out = String::new();
    for entry in entries {
        out.push_str(&format!(
            "{}\n{} | {} | {}\n\n{}\n",
            separator,
            format!("r{}", entry.revision).green().bold(),
            entry.author.as_deref().unwrap_or("(no author)"),
            entry
                .date
                .map(|date| date.to_rfc3339())
                .unwrap_or_else(|| "(no date)".to_string()),
            entry.message.trim_end()
        ));
    }
    if !entries.is_empty() {
        out.push_str(&separator);
        out.push('\n');
    }
    out
}
