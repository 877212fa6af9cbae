pub mod commands;
pub mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process::exit;
use std::sync::Arc;
use std::time::Duration;

use crate::common::error::SvnError;
use crate::domain::entities::SvnUser;
use crate::domain::value_objects::{RepositoryType, Revision, SvnProtocol};
use crate::infrastructure::filesystem::{ConfigStore, SvnApiConfig};
use crate::infrastructure::process::{CommandExecutor, ExecutionMode};
use crate::infrastructure::svn::{SvnAdmin, SvnClient};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    Text,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

/// svnapi - typed access to Subversion repositories
#[derive(Debug, Parser)]
#[command(name = "svnapi")]
#[command(about = "Typed client and administration commands for Subversion repositories")]
#[command(version)]
#[command(long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ", built ", env!("BUILD_DATE"), ")"))]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (defaults to the user configuration directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Repository root URL (overrides `server_url` from the configuration)
    #[arg(long, global = true)]
    pub root_url: Option<String>,

    /// User name passed to svn
    #[arg(short, long, global = true, env = "SVNAPI_USERNAME")]
    pub username: Option<String>,

    /// Password passed to svn
    #[arg(short, long, global = true, env = "SVNAPI_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Command timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Supervise processes on a blocking worker instead of the async runtime
    #[arg(long, global = true)]
    pub sync: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Output format (text, json, yaml)
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the head revision of the repository
    Head,

    /// Print the revision in which a path last changed
    LastChanged {
        /// Path relative to the repository root
        #[arg(default_value = "")]
        path: String,
    },

    /// List the entries of a directory
    List {
        /// Directory relative to the repository root
        #[arg(default_value = "")]
        path: String,

        /// Revision number or HEAD
        #[arg(short, long, default_value = "HEAD")]
        revision: Revision,

        /// Look up svn:mime-type for every listed file
        #[arg(long)]
        mime_types: bool,
    },

    /// Show a single node
    Info {
        /// Path relative to the repository root
        #[arg(default_value = "")]
        path: String,

        /// Revision number or HEAD
        #[arg(short, long, default_value = "HEAD")]
        revision: Revision,
    },

    /// Show the commit that last changed a path, with its message
    LastCommit {
        /// Path relative to the repository root
        #[arg(default_value = "")]
        path: String,
    },

    /// Print file content
    Cat {
        /// File relative to the repository root
        path: String,

        /// Revision number or HEAD
        #[arg(short, long, default_value = "HEAD")]
        revision: Revision,
    },

    /// Show per-line authorship of a file
    Blame {
        /// File relative to the repository root
        path: String,

        /// Revision number or HEAD
        #[arg(short, long, default_value = "HEAD")]
        revision: Revision,
    },

    /// Show changes between two revisions
    Diff {
        /// Path relative to the repository root
        path: String,

        /// Older revision
        #[arg(long)]
        from: Revision,

        /// Newer revision
        #[arg(long, default_value = "HEAD")]
        to: Revision,
    },

    /// Show the commit log
    Log {
        /// Path relative to the repository root
        #[arg(default_value = "")]
        path: String,

        /// Maximum number of entries
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Create a directory (with parents) in the repository
    Mkdir {
        /// Directory relative to the repository root
        path: String,

        /// Commit message
        #[arg(short, long)]
        message: String,
    },

    /// Move or rename a path in the repository
    Move {
        /// Source path
        source: String,

        /// Destination path
        destination: String,

        /// Commit message
        #[arg(short, long)]
        message: String,
    },

    /// Lock a file
    Lock {
        /// File relative to the repository root
        path: String,

        /// Lock comment
        #[arg(short, long)]
        message: Option<String>,

        /// Steal an existing lock
        #[arg(short, long)]
        force: bool,
    },

    /// Unlock a file
    Unlock {
        /// File relative to the repository root
        path: String,

        /// Break a lock held by someone else
        #[arg(short, long)]
        force: bool,
    },

    /// Show the lock on a file
    LockInfo {
        /// File relative to the repository root
        path: String,
    },

    /// Show the svn:mime-type of a file
    MimeType {
        /// File relative to the repository root
        path: String,
    },

    /// Export a path to a local directory
    Export {
        /// Path relative to the repository root
        path: String,

        /// Local destination
        destination: PathBuf,

        /// Revision number or HEAD
        #[arg(short, long, default_value = "HEAD")]
        revision: Revision,
    },

    /// Manage local repositories
    Repo {
        #[command(subcommand)]
        command: RepoCommands,
    },
}

#[derive(Debug, Subcommand)]
pub enum RepoCommands {
    /// Create a repository with the given user as administrator
    Create {
        /// Repository name
        name: String,

        /// Directory holding repositories (defaults to `repository_root`)
        #[arg(long)]
        root: Option<PathBuf>,

        /// Backend storage format
        #[arg(long, default_value = "fsfs")]
        fs_type: RepositoryType,

        /// Protocol clients use to reach the repository
        #[arg(long, default_value = "svn")]
        protocol: SvnProtocol,

        /// Host name used in the printed repository URL
        #[arg(long, default_value = "localhost")]
        host: String,
    },

    /// Rename a repository
    Move {
        /// Current name
        old_name: String,

        /// New name
        new_name: String,

        /// Directory holding repositories (defaults to `repository_root`)
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// Delete a repository and all of its history
    Delete {
        /// Repository name
        name: String,

        /// Directory holding repositories (defaults to `repository_root`)
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// Restart svnserve for the repository root
    Restart {
        /// Directory served by svnserve (defaults to `repository_root`)
        #[arg(long)]
        root: Option<PathBuf>,
    },
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl CliApp {
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    pub fn from_cli(cli: Cli) -> Self {
        Self { cli }
    }

    pub fn cli(&self) -> &Cli {
        &self.cli
    }

    pub async fn run(self) -> anyhow::Result<()> {
        colored::control::set_override(!self.cli.no_color);

        match self.handle_command().await {
            Ok(_) => Ok(()),
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), describe_error(&e));
                exit(1);
            }
        }
    }

    async fn handle_command(&self) -> anyhow::Result<()> {
        let config = self.load_config()?;

        match &self.cli.command {
            Commands::Repo { command } => {
                let executor = self.executor(&config);
                let platform = executor.platform().clone();
                let admin = SvnAdmin::new(Arc::new(executor), platform)
                    .with_svnadmin_executable(&config.svnadmin_executable)
                    .with_svnserve_executable(&config.svnserve_executable);
                let handler = commands::repo::RepoCommandHandler::new(
                    admin,
                    config.repository_root.clone(),
                    self.user(),
                    self.cli.output,
                );
                handler.execute(command).await
            }
            command => {
                let client = self.client(&config)?;
                let handler = commands::client::ClientCommandHandler::new(&client, self.cli.output);
                handler.execute(command).await
            }
        }
    }

    fn load_config(&self) -> anyhow::Result<SvnApiConfig> {
        let store = ConfigStore::new();
        match self.cli.config.clone().or_else(ConfigStore::default_path) {
            Some(path) => Ok(store.load(path)?),
            None => Ok(SvnApiConfig::default()),
        }
    }

    fn executor(&self, config: &SvnApiConfig) -> CommandExecutor {
        let mut executor = config.executor();
        if let Some(timeout) = self.cli.timeout {
            executor = executor.with_default_timeout(Duration::from_secs(timeout));
        }
        if self.cli.sync {
            executor = executor.with_mode(ExecutionMode::Sync);
        }
        executor
    }

    fn user(&self) -> Option<SvnUser> {
        self.cli.username.as_ref().map(|username| {
            SvnUser::new(username.clone(), self.cli.password.clone().unwrap_or_default())
        })
    }

    fn client(&self, config: &SvnApiConfig) -> anyhow::Result<SvnClient> {
        let root_url = self
            .cli
            .root_url
            .clone()
            .or_else(|| config.server_url.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("No repository root URL: pass --root-url or set server_url in the configuration")
            })?;

        let mut client = SvnClient::new(root_url, Arc::new(self.executor(config)))
            .with_executable(&config.svn_executable);
        if let Some(user) = self.user() {
            client = client.with_user(user);
        }
        Ok(client)
    }
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Message shown to the user, with the error code when there is one
pub fn describe_error(error: &anyhow::Error) -> String {
    match error.downcast_ref::<SvnError>() {
        Some(svn_error) => match svn_error.error_code() {
            Some(code) if !svn_error.to_string().contains(code) => {
                format!("[{}] {}", code, svn_error)
            }
            _ => svn_error.to_string(),
        },
        None => error.to_string(),
    }
}
