use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::json;
use std::path::PathBuf;

use crate::domain::entities::{SvnRepository, SvnUser};
use crate::infrastructure::svn::SvnAdmin;
use crate::presentation::cli::output::render;
use crate::presentation::cli::{OutputFormat, RepoCommands};

/// Runs the `repo` subcommands
pub struct RepoCommandHandler {
    admin: SvnAdmin,
    default_root: PathBuf,
    user: Option<SvnUser>,
    output: OutputFormat,
}

impl RepoCommandHandler {
    pub fn new(
        admin: SvnAdmin,
        default_root: PathBuf,
        user: Option<SvnUser>,
        output: OutputFormat,
    ) -> Self {
        Self {
            admin,
            default_root,
            user,
            output,
        }
    }

    pub async fn execute(&self, command: &RepoCommands) -> Result<()> {
        let message = match command {
            RepoCommands::Create {
                name,
                root,
                fs_type,
                protocol,
                host,
            } => {
                let user = self
                    .user
                    .clone()
                    .context("repo create needs --username and --password for the administrator")?;
                let repository = SvnRepository::new(name.clone(), self.root(root), user)
                    .with_repository_type(*fs_type)
                    .with_protocol(*protocol);
                let path = self.admin.create_repository(&repository).await?;
                format!("Created repository {} at {}", path.display(), repository.url(host))
            }
            RepoCommands::Move {
                old_name,
                new_name,
                root,
            } => {
                let path = self
                    .admin
                    .move_repository(&self.root(root), old_name, new_name)
                    .await?;
                format!("Moved repository {} to {}", old_name, path.display())
            }
            RepoCommands::Delete { name, root } => {
                self.admin.delete_repository(&self.root(root), name).await?;
                format!("Deleted repository {}", name)
            }
            RepoCommands::Restart { root } => {
                let root = self.root(root);
                self.admin.restart_svnserve(&root).await?;
                format!("Restarted svnserve for {}", root.display())
            }
        };

        let rendered = render(&json!({ "status": "ok", "message": message }), self.output, |_| {
            format!("{} {}\n", "✓".green().bold(), message)
        })?;
        print!("{}", rendered);
        Ok(())
    }

    fn root(&self, root: &Option<PathBuf>) -> PathBuf {
        root.clone().unwrap_or_else(|| self.default_root.clone())
    }
}
