use crate::common::error::SvnError;
use crate::common::result::{OptionExt, SvnResult};
use crate::domain::entities::{Commit, Entry, Lock, LogEntry, SvnUser};
use crate::domain::value_objects::Revision;
use crate::infrastructure::process::{join_args, CommandRunner, CommandSpec, ExecutionResult, OutputCharset};
use crate::infrastructure::svn::decoder::{decode_long, decode_string, decode_xml};
use crate::infrastructure::svn::parser::{parse_entry_list, parse_info_entry, parse_log, ListingContext};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Default client executable
pub const SVN_EXECUTABLE: &str = "svn";

/// Warning code reported by `svn propget` for a property that is not set
pub const PROPERTY_NOT_FOUND: &str = "W200017";

/// Validation codes carried on `SvnError::Validation`
pub const USER_REQUIRED: &str = "EC0001";
pub const ROOT_REQUIRED: &str = "EC0002";
pub const PATH_REQUIRED: &str = "EC0003";

/// Repository operations exposed by the client.
///
/// Paths are relative to the client's root URL. Operations that address a
/// single node (`lock`, `file_content`, `mime_type`, ...) reject a blank
/// path; listing-style operations treat a blank path as the root.
#[async_trait]
pub trait SvnClientOperations: Send + Sync {
    /// Create a directory (and missing parents) directly in the repository
    async fn mkdir(&self, path: &str, message: &str) -> SvnResult<()>;

    /// Youngest revision of the repository
    async fn head_revision(&self) -> SvnResult<u64>;

    /// Revision in which `path` last changed
    async fn last_changed_revision(&self, path: &str) -> SvnResult<u64>;

    /// Entries of the directory at `path`, in the tool's order
    async fn list(&self, path: &str, revision: Revision) -> SvnResult<Vec<Entry>>;

    /// The node at `path` itself
    async fn info(&self, path: &str, revision: Revision) -> SvnResult<Entry>;

    /// Current lock on `path`, `None` when unlocked
    async fn get_lock(&self, path: &str) -> SvnResult<Option<Lock>>;

    async fn lock(&self, path: &str, comment: Option<&str>, force: bool) -> SvnResult<()>;

    async fn unlock(&self, path: &str, force: bool) -> SvnResult<()>;

    /// File content decoded as UTF-8
    async fn file_content(&self, path: &str, revision: Revision) -> SvnResult<String>;

    async fn blame(&self, path: &str, revision: Revision) -> SvnResult<String>;

    /// Unified diff of `path` between two revisions
    async fn diff(&self, path: &str, older: Revision, newer: Revision) -> SvnResult<String>;

    async fn move_path(&self, source: &str, destination: &str, message: &str) -> SvnResult<()>;

    /// Export `path` into `destination`, overwriting existing files
    async fn export(&self, path: &str, revision: Revision, destination: &Path) -> SvnResult<PathBuf>;

    /// Log entries of `path`, newest first, at most `limit` of them
    async fn log(&self, path: &str, limit: Option<u32>) -> SvnResult<Vec<LogEntry>>;

    /// Message of the commit that created `revision`
    async fn commit_message(&self, path: &str, revision: Revision) -> SvnResult<Option<String>>;

    /// Commit that last changed `path`, with its message filled in
    async fn last_commit(&self, path: &str) -> SvnResult<Option<Commit>>;

    /// `svn:mime-type` of `path`, `None` when the property is not set
    async fn mime_type(&self, path: &str) -> SvnResult<Option<String>>;
}

/// `svn` command-line client bound to one repository root
pub struct SvnClient {
    root_url: String,
    user: Option<SvnUser>,
    runner: Arc<dyn CommandRunner>,
    svn_executable: String,
    timeout: Option<Duration>,
}

impl SvnClient {
    /// Create a client for `root_url` that runs commands through `runner`
    pub fn new(root_url: impl Into<String>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            root_url: root_url.into(),
            user: None,
            runner,
            svn_executable: SVN_EXECUTABLE.to_string(),
            timeout: None,
        }
    }

    /// Set credentials
    pub fn with_user(mut self, user: SvnUser) -> Self {
        self.user = Some(user);
        self
    }

    /// Create a new client with custom executable path
    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.svn_executable = executable.into();
        self
    }

    /// Set the per-command timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    /// URL of `path` under the root
    pub fn url_for(&self, path: &str) -> String {
        Entry::join_path(&self.root_url, path.trim().trim_matches('/'))
    }

    fn validate(&self) -> SvnResult<&SvnUser> {
        let user = self
            .user
            .as_ref()
            .filter(|user| !user.username.trim().is_empty())
            .ok_or_svn(SvnError::validation_error_with_code(
                "user",
                "SVN user is required",
                USER_REQUIRED,
            ))?;
        if self.root_url.trim().is_empty() {
            return Err(SvnError::validation_error_with_code(
                "root_url",
                "repository root URL is required",
                ROOT_REQUIRED,
            ));
        }
        Ok(user)
    }

    fn validate_path(&self, path: &str) -> SvnResult<()> {
        self.validate()?;
        if path.trim().is_empty() {
            return Err(SvnError::validation_error_with_code(
                "path",
                "path is required",
                PATH_REQUIRED,
            ));
        }
        Ok(())
    }

    /// Build the `CommandSpec` for `svn <args>` with credentials attached
    fn command(&self, args: &[&str]) -> SvnResult<CommandSpec> {
        let user = self.validate()?;
        let mut parts = Vec::with_capacity(args.len() + 1);
        parts.push(self.svn_executable.as_str());
        parts.extend_from_slice(args);

        let mut spec = CommandSpec::new(join_args(&parts)?).with_auth_suffix(join_args(&user.auth_args())?);
        if let Some(timeout) = self.timeout {
            spec = spec.with_timeout(timeout);
        }
        Ok(spec)
    }

    async fn run(&self, spec: &CommandSpec) -> SvnResult<ExecutionResult> {
        self.runner.execute(spec, true).await
    }

    async fn run_string(&self, spec: CommandSpec) -> SvnResult<String> {
        let result = self.run(&spec).await?;
        decode_string(&result, spec.ignore_error)
    }

    async fn run_xml(&self, spec: CommandSpec) -> SvnResult<xmltree::Element> {
        let result = self.run(&spec).await?;
        decode_xml(&result, spec.ignore_error)
    }

    async fn run_long(&self, spec: CommandSpec) -> SvnResult<u64> {
        let result = self.run(&spec).await?;
        let value = decode_long(&result, spec.ignore_error)?;
        u64::try_from(value)
            .map_err(|_| SvnError::malformed_output(format!("negative revision {} in output", value)))
    }

    async fn list_at(&self, url: &str, revision: u64) -> SvnResult<xmltree::Element> {
        let revision = revision.to_string();
        self.run_xml(self.command(&["list", url, "--xml", "-r", &revision])?)
            .await
    }
}

#[async_trait]
impl SvnClientOperations for SvnClient {
    async fn mkdir(&self, path: &str, message: &str) -> SvnResult<()> {
        self.validate_path(path)?;
        let url = self.url_for(path);
        self.run_string(self.command(&["mkdir", &url, "-q", "-m", message, "--parents"])?)
            .await?;
        info!(url = %url, "created directory");
        Ok(())
    }

    async fn head_revision(&self) -> SvnResult<u64> {
        self.run_long(self.command(&[
            "info",
            &self.root_url,
            "--show-item",
            "revision",
            "--no-newline",
        ])?)
        .await
    }

    async fn last_changed_revision(&self, path: &str) -> SvnResult<u64> {
        let url = self.url_for(path);
        self.run_long(self.command(&[
            "info",
            &url,
            "--show-item",
            "last-changed-revision",
            "--no-newline",
        ])?)
        .await
    }

    async fn list(&self, path: &str, revision: Revision) -> SvnResult<Vec<Entry>> {
        self.validate()?;
        let url = self.url_for(path);

        // One head lookup per listing; it can run alongside an explicit revision
        let (head, document) = match revision {
            Revision::Head => {
                let head = self.head_revision().await?;
                (head, self.list_at(&url, revision.resolve(head)).await?)
            }
            Revision::Number(number) => {
                futures::try_join!(self.head_revision(), self.list_at(&url, number))?
            }
        };

        let context = ListingContext::new(path.trim().trim_matches('/'), head).with_parent_url(url);
        let entries = parse_entry_list(&document, &context)?;
        debug!(count = entries.len(), head, "listed entries");
        Ok(entries)
    }

    async fn info(&self, path: &str, revision: Revision) -> SvnResult<Entry> {
        let url = self.url_for(path);
        let revision = revision.to_string();
        let document = self
            .run_xml(self.command(&["info", &url, "--xml", "-r", &revision])?)
            .await?;
        parse_info_entry(&document)
    }

    async fn get_lock(&self, path: &str) -> SvnResult<Option<Lock>> {
        self.validate_path(path)?;
        Ok(self.info(path, Revision::Head).await?.lock)
    }

    async fn lock(&self, path: &str, comment: Option<&str>, force: bool) -> SvnResult<()> {
        self.validate_path(path)?;
        let url = self.url_for(path);
        let mut args = vec!["lock", url.as_str()];
        if let Some(comment) = comment {
            args.extend(["-m", comment]);
        }
        if force {
            args.push("--force");
        }
        self.run_string(self.command(&args)?).await?;
        info!(url = %url, force, "locked");
        Ok(())
    }

    async fn unlock(&self, path: &str, force: bool) -> SvnResult<()> {
        self.validate_path(path)?;
        let url = self.url_for(path);
        let mut args = vec!["unlock", url.as_str()];
        if force {
            args.push("--force");
        }
        self.run_string(self.command(&args)?).await?;
        info!(url = %url, force, "unlocked");
        Ok(())
    }

    async fn file_content(&self, path: &str, revision: Revision) -> SvnResult<String> {
        self.validate_path(path)?;
        let url = self.url_for(path);
        let revision = revision.to_string();
        let spec = self
            .command(&["cat", &url, "-r", &revision])?
            .with_charset(OutputCharset::Utf8);
        self.run_string(spec).await
    }

    async fn blame(&self, path: &str, revision: Revision) -> SvnResult<String> {
        self.validate_path(path)?;
        let url = self.url_for(path);
        let revision = revision.to_string();
        self.run_string(self.command(&["blame", &url, "-r", &revision])?)
            .await
    }

    async fn diff(&self, path: &str, older: Revision, newer: Revision) -> SvnResult<String> {
        self.validate_path(path)?;
        let url = self.url_for(path);
        let range = format!("{}:{}", older, newer);
        self.run_string(self.command(&["diff", &url, "-r", &range])?)
            .await
    }

    async fn move_path(&self, source: &str, destination: &str, message: &str) -> SvnResult<()> {
        self.validate_path(source)?;
        self.validate_path(destination)?;
        let from = self.url_for(source);
        let to = self.url_for(destination);
        self.run_string(self.command(&["move", &from, &to, "-q", "-m", message, "--parents"])?)
            .await?;
        info!(from = %from, to = %to, "moved");
        Ok(())
    }

    async fn export(&self, path: &str, revision: Revision, destination: &Path) -> SvnResult<PathBuf> {
        self.validate_path(path)?;
        let url = self.url_for(path);
        let revision = revision.to_string();
        let target = destination.to_string_lossy();
        self.run_string(self.command(&["export", &url, &target, "-r", &revision, "--force", "-q"])?)
            .await?;
        Ok(destination.to_path_buf())
    }

    async fn log(&self, path: &str, limit: Option<u32>) -> SvnResult<Vec<LogEntry>> {
        let url = self.url_for(path);
        let limit = limit.map(|limit| limit.to_string());
        let mut args = vec!["log", url.as_str(), "--xml"];
        if let Some(limit) = limit.as_deref() {
            args.extend(["-l", limit]);
        }
        let document = self.run_xml(self.command(&args)?).await?;
        parse_log(&document)
    }

    async fn commit_message(&self, path: &str, revision: Revision) -> SvnResult<Option<String>> {
        let url = self.url_for(path);
        let revision = revision.to_string();
        let document = self
            .run_xml(self.command(&["log", &url, "--xml", "-r", &revision])?)
            .await?;
        Ok(parse_log(&document)?
            .into_iter()
            .next()
            .map(|entry| entry.message))
    }

    async fn last_commit(&self, path: &str) -> SvnResult<Option<Commit>> {
        let commit = match self.info(path, Revision::Head).await?.commit {
            Some(commit) => commit,
            None => return Ok(None),
        };
        let message = self
            .commit_message(path, Revision::Number(commit.revision))
            .await?;
        Ok(Some(match message {
            Some(message) => commit.with_message(message),
            None => commit,
        }))
    }

    async fn mime_type(&self, path: &str) -> SvnResult<Option<String>> {
        self.validate_path(path)?;
        let url = self.url_for(path);
        match self
            .run_string(self.command(&["propget", "svn:mime-type", &url])?)
            .await
        {
            Ok(value) => {
                let value = value.trim();
                Ok((!value.is_empty()).then(|| value.to_string()))
            }
            Err(e) if e.error_code() == Some(PROPERTY_NOT_FOUND) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
