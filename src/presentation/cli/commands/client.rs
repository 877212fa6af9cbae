use anyhow::Result;
use colored::Colorize;
use serde_json::json;

use crate::common::error::SvnError;
use crate::domain::entities::Entry;
use crate::infrastructure::svn::SvnClientOperations;
use crate::presentation::cli::output::{
    commit_text, entries_text, entry_text, lock_text, log_text, render,
};
use crate::presentation::cli::{Commands, OutputFormat};

/// Runs the repository subcommands against a client
pub struct ClientCommandHandler<'a> {
    client: &'a dyn SvnClientOperations,
    output: OutputFormat,
}

impl<'a> ClientCommandHandler<'a> {
    pub fn new(client: &'a dyn SvnClientOperations, output: OutputFormat) -> Self {
        Self { client, output }
    }

    pub async fn execute(&self, command: &Commands) -> Result<()> {
        let rendered = self.render(command).await?;
        print!("{}", rendered);
        Ok(())
    }

    /// Output for `command`, without printing it
    pub async fn render(&self, command: &Commands) -> Result<String> {
        let client = self.client;
        match command {
            Commands::Head => {
                let revision = client.head_revision().await?;
                render(&json!({ "revision": revision }), self.output, |_| {
                    format!("{}\n", revision)
                })
            }
            Commands::LastChanged { path } => {
                let revision = client.last_changed_revision(path).await?;
                render(&json!({ "path": path, "revision": revision }), self.output, |_| {
                    format!("{}\n", revision)
                })
            }
            Commands::List {
                path,
                revision,
                mime_types,
            } => {
                let mut entries = client.list(path, *revision).await?;
                if *mime_types {
                    entries = self.with_mime_types(entries).await?;
                }
                render(&entries, self.output, |entries| entries_text(entries))
            }
            Commands::Info { path, revision } => {
                let entry = client.info(path, *revision).await?;
                render(&entry, self.output, entry_text)
            }
            Commands::LastCommit { path } => {
                let commit = client.last_commit(path).await?;
                render(&commit, self.output, commit_text)
            }
            Commands::Cat { path, revision } => {
                let content = client.file_content(path, *revision).await?;
                render(&json!({ "path": path, "content": content }), self.output, |_| content.clone())
            }
            Commands::Blame { path, revision } => {
                let blame = client.blame(path, *revision).await?;
                render(&json!({ "path": path, "blame": blame }), self.output, |_| blame.clone())
            }
            Commands::Diff { path, from, to } => {
                let diff = client.diff(path, *from, *to).await?;
                render(&json!({ "path": path, "diff": diff }), self.output, |_| diff.clone())
            }
            Commands::Log { path, limit } => {
                let entries = client.log(path, *limit).await?;
                render(&entries, self.output, |entries| log_text(entries))
            }
            Commands::Mkdir { path, message } => {
                client.mkdir(path, message).await?;
                self.done(&format!("Created {}", path))
            }
            Commands::Move {
                source,
                destination,
                message,
            } => {
                client.move_path(source, destination, message).await?;
                self.done(&format!("Moved {} to {}", source, destination))
            }
            Commands::Lock {
                path,
                message,
                force,
            } => {
                client.lock(path, message.as_deref(), *force).await?;
                self.done(&format!("Locked {}", path))
            }
            Commands::Unlock { path, force } => {
                client.unlock(path, *force).await?;
                self.done(&format!("Unlocked {}", path))
            }
            Commands::LockInfo { path } => {
                let lock = client.get_lock(path).await?;
                render(&lock, self.output, lock_text)
            }
            Commands::MimeType { path } => {
                let mime_type = client.mime_type(path).await?;
                render(&json!({ "path": path, "mime_type": mime_type }), self.output, |_| {
                    format!("{}\n", mime_type.as_deref().unwrap_or("(not set)"))
                })
            }
            Commands::Export {
                path,
                destination,
                revision,
            } => {
                let exported = client.export(path, *revision, destination).await?;
                self.done(&format!("Exported {} to {}", path, exported.display()))
            }
            Commands::Repo { .. } => Err(anyhow::anyhow!(
                "repository administration is not a client command"
            )),
        }
    }

    /// Fill `mime_type` on file entries, one lookup per file
    async fn with_mime_types(&self, entries: Vec<Entry>) -> Result<Vec<Entry>> {
        let client = self.client;
        let lookups = entries.into_iter().map(|entry| async move {
            if !entry.kind.is_file() {
                return Ok::<_, SvnError>(entry);
            }
            Ok(match client.mime_type(&entry.path).await? {
                Some(mime_type) => entry.with_mime_type(mime_type),
                None => entry,
            })
        });
        Ok(futures::future::try_join_all(lookups).await?)
    }

    fn done(&self, message: &str) -> Result<String> {
        render(&json!({ "status": "ok", "message": message }), self.output, |_| {
            format!("{} {}\n", "✓".green().bold(), message)
        })
    }
}
