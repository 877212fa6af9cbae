//! Walks `svn ... --xml` documents into domain records.
//!
//! A missing or unparseable required field aborts the whole parse. Optional
//! `commit` and `lock` elements only produce a record when they have content.

use crate::common::error::SvnError;
use crate::common::result::{OptionExt, ResultExt, SvnResult};
use crate::domain::entities::{Commit, Entry, Lock, LogEntry};
use crate::domain::value_objects::NodeKind;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use xmltree::{Element, XMLNode};

/// Timestamp format written by `svn` in XML output
pub const SVN_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Caller-supplied values stamped onto every listed entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingContext {
    /// Path of the listed directory relative to the repository root
    pub parent_path: String,

    /// URL of the listed directory; falls back to the `path` attribute of `<list>`
    pub parent_url: Option<String>,

    /// Head revision resolved once for the whole listing
    pub head_revision: u64,
}

impl ListingContext {
    pub fn new(parent_path: impl Into<String>, head_revision: u64) -> Self {
        Self {
            parent_path: parent_path.into(),
            parent_url: None,
            head_revision,
        }
    }

    pub fn with_parent_url(mut self, parent_url: impl Into<String>) -> Self {
        self.parent_url = Some(parent_url.into());
        self
    }
}

/// Parse `svn list --xml` output. Entries keep document order.
pub fn parse_entry_list(document: &Element, context: &ListingContext) -> SvnResult<Vec<Entry>> {
    let list = if document.name == "list" {
        document
    } else {
        document.get_child("list").ok_or_else(|| {
            SvnError::malformed_output(format!(
                "expected a <list> element inside <{}>",
                document.name
            ))
        })?
    };

    let parent_url = context
        .parent_url
        .clone()
        .or_else(|| list.attributes.get("path").cloned())
        .unwrap_or_default();

    child_elements(list, "entry")
        .map(|entry| parse_list_entry(entry, context, &parent_url))
        .collect()
}

fn parse_list_entry(element: &Element, context: &ListingContext, parent_url: &str) -> SvnResult<Entry> {
    let kind = NodeKind::from_attribute(element.attributes.get("kind").map(String::as_str));
    let name = required_field(element, "name", "entry")?;

    let mut entry = Entry::new(
        kind,
        name.clone(),
        context.parent_path.clone(),
        parent_url,
        context.head_revision,
    );

    if kind.is_file() {
        let size = required_field(element, "size", &format!("file entry '{}'", name))?;
        entry = entry.with_size(parse_u64(&size, "size")?);
    }
    if let Some(commit) = parse_commit(element)? {
        entry = entry.with_commit(commit);
    }
    if let Some(lock) = parse_lock(element)? {
        entry = entry.with_lock(lock);
    }

    Ok(entry)
}

/// Parse the first entry of `svn info --xml` output.
///
/// The head revision is the entry's own `revision` attribute, and the path
/// comes from `relative-url` with the leading `^/` removed.
pub fn parse_info_entry(document: &Element) -> SvnResult<Entry> {
    let element = if document.name == "entry" {
        document
    } else {
        document
            .get_child("entry")
            .ok_or_malformed_output("expected an <entry> element in info output")?
    };

    let kind = NodeKind::from_attribute(element.attributes.get("kind").map(String::as_str));
    let head_revision = parse_u64(&required_field(element, "revision", "info entry")?, "revision")?;
    let url = required_field(element, "url", "info entry")?;

    let relative = child_text(element, "relative-url")
        .map(|relative| relative.trim_start_matches('^').trim_start_matches('/').to_string())
        .unwrap_or_default();
    let (parent_path, name) = split_last_segment(&relative);
    let (parent_url, url_name) = split_last_segment(&url);
    let name = if name.is_empty() { url_name } else { name };

    let mut entry = Entry::new(kind, name, parent_path, parent_url, head_revision);
    if let Some(commit) = parse_commit(element)? {
        entry = entry.with_commit(commit);
    }
    if let Some(lock) = parse_lock(element)? {
        entry = entry.with_lock(lock);
    }
    Ok(entry)
}

/// Parse `svn log --xml` output in document order
pub fn parse_log(document: &Element) -> SvnResult<Vec<LogEntry>> {
    child_elements(document, "logentry")
        .map(|element| {
            let revision = parse_u64(&required_field(element, "revision", "log entry")?, "revision")?;
            let date = child_text(element, "date")
                .map(|date| parse_date(&date))
                .transpose()?;
            Ok(LogEntry {
                revision,
                author: child_text(element, "author"),
                date,
                message: raw_child_text(element, "msg").unwrap_or_default(),
            })
        })
        .collect()
}

/// Commit sub-record of `parent`, `None` when absent or empty.
///
/// `<commit revision="N"/>` still carries the revision; author and date
/// are optional.
pub fn parse_commit(parent: &Element) -> SvnResult<Option<Commit>> {
    let element = match parent.get_child("commit") {
        Some(element) if has_content(element) || has_attributes(element) => element,
        _ => return Ok(None),
    };

    let revision = parse_u64(&required_field(element, "revision", "commit")?, "commit revision")?;
    let date = child_text(element, "date")
        .map(|date| parse_date(&date))
        .transpose()?;
    Ok(Some(Commit::new(revision, child_text(element, "author"), date)))
}

/// Lock sub-record of `parent`, `None` when absent or empty
pub fn parse_lock(parent: &Element) -> SvnResult<Option<Lock>> {
    let element = match parent.get_child("lock") {
        Some(element) if has_content(element) => element,
        _ => return Ok(None),
    };

    let token = required_field(element, "token", "lock")?;
    let owner = required_field(element, "owner", "lock")?;
    let created = parse_date(&required_field(element, "created", "lock")?)?;

    let mut lock = Lock::new(token, owner, created);
    if let Some(comment) = raw_child_text(element, "comment") {
        lock = lock.with_comment(comment);
    }
    Ok(Some(lock))
}

/// Parse a timestamp in [`SVN_DATE_FORMAT`]
pub fn parse_date(value: &str) -> SvnResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), SVN_DATE_FORMAT)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .with_malformed_output(format!("invalid date '{}'", value))
}

fn child_elements<'a>(parent: &'a Element, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
    parent.children.iter().filter_map(move |node| match node {
        XMLNode::Element(element) if element.name == name => Some(element),
        _ => None,
    })
}

fn has_content(element: &Element) -> bool {
    element.children.iter().any(|node| match node {
        XMLNode::Element(_) => true,
        XMLNode::Text(text) | XMLNode::CData(text) => !text.trim().is_empty(),
        _ => false,
    })
}

fn has_attributes(element: &Element) -> bool {
    element.attributes.values().any(|value| !value.trim().is_empty())
}

fn raw_child_text(element: &Element, name: &str) -> Option<String> {
    element
        .get_child(name)
        .and_then(|child| child.get_text())
        .map(|text| text.into_owned())
}

fn child_text(element: &Element, name: &str) -> Option<String> {
    raw_child_text(element, name)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

// Sub-element text first, attribute second
fn required_field(element: &Element, name: &str, context: &str) -> SvnResult<String> {
    child_text(element, name)
        .or_else(|| {
            element
                .attributes
                .get(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        })
        .ok_or_malformed_output(format!("{} is missing required '{}'", context, name))
}

fn parse_u64(value: &str, field: &str) -> SvnResult<u64> {
    value
        .trim()
        .parse::<u64>()
        .with_malformed_output(format!("invalid {} '{}'", field, value))
}

fn split_last_segment(path: &str) -> (&str, &str) {
    let path = path.trim_end_matches('/');
    match path.rfind('/') {
        Some(index) => (&path[..index], &path[index + 1..]),
        None => ("", path),
    }
}
