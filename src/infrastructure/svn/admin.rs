use crate::common::error::SvnError;
use crate::common::result::{ResultExt, SvnResult};
use crate::common::templates::{
    get_authz_template, get_passwd_template, get_svnserve_conf_template, TemplateProcessor,
};
use crate::domain::entities::SvnRepository;
use crate::infrastructure::process::{join_args, CommandRunner, CommandSpec, Platform};
use crate::infrastructure::svn::decoder::decode_string;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Default administrative executable
pub const SVNADMIN_EXECUTABLE: &str = "svnadmin";

/// Default server executable
pub const SVNSERVE_EXECUTABLE: &str = "svnserve";

/// Files under `conf/` that are backed up and then rewritten on creation
pub const CONF_FILES: [&str; 3] = ["authz", "passwd", "svnserve.conf"];

/// `~/svn`, or `./svn` when there is no home directory
pub fn default_repository_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("svn")
}

/// Repository lifecycle on the local machine
pub struct SvnAdmin {
    runner: Arc<dyn CommandRunner>,
    platform: Platform,
    svnadmin_executable: String,
    svnserve_executable: String,
}

impl SvnAdmin {
    /// Create an admin for `platform` that runs commands through `runner`
    pub fn new(runner: Arc<dyn CommandRunner>, platform: Platform) -> Self {
        Self {
            runner,
            platform,
            svnadmin_executable: SVNADMIN_EXECUTABLE.to_string(),
            svnserve_executable: SVNSERVE_EXECUTABLE.to_string(),
        }
    }

    pub fn with_svnadmin_executable(mut self, executable: impl Into<String>) -> Self {
        self.svnadmin_executable = executable.into();
        self
    }

    pub fn with_svnserve_executable(mut self, executable: impl Into<String>) -> Self {
        self.svnserve_executable = executable.into();
        self
    }

    /// Create the repository and write its access configuration.
    ///
    /// The files `svnadmin` generated under `conf/` are kept in
    /// `conf/backup/` before the templates overwrite them. Returns the
    /// repository directory.
    pub async fn create_repository(&self, repository: &SvnRepository) -> SvnResult<PathBuf> {
        validate_name(&repository.name)?;
        if repository.admin_user.username.trim().is_empty() {
            return Err(SvnError::validation_error(
                "admin_user",
                "administrator user name is required",
            ));
        }

        tokio::fs::create_dir_all(&repository.root_path)
            .await
            .with_filesystem_error(
                "failed to create repository root",
                Some(repository.root_path.clone()),
            )?;

        let path = repository.local_path();
        let path_arg = path.to_string_lossy();
        let command = join_args(&[
            self.svnadmin_executable.as_str(),
            "create",
            path_arg.as_ref(),
            "--fs-type",
            repository.repository_type.fs_type(),
        ])?;
        self.run(CommandSpec::new(command)).await?;

        let conf = path.join("conf");
        backup_conf_files(&conf).await?;

        let rendered = [
            (
                "svnserve.conf",
                TemplateProcessor::new()
                    .with_value("realm", &repository.name)
                    .process(get_svnserve_conf_template()),
            ),
            (
                "authz",
                TemplateProcessor::new()
                    .with_value("username", &repository.admin_user.username)
                    .process(get_authz_template()),
            ),
            (
                "passwd",
                TemplateProcessor::new()
                    .with_value("username", &repository.admin_user.username)
                    .with_value("password", &repository.admin_user.password)
                    .process(get_passwd_template()),
            ),
        ];
        for (file, content) in rendered {
            let target = conf.join(file);
            tokio::fs::write(&target, content)
                .await
                .with_filesystem_error("failed to write configuration", Some(target.clone()))?;
        }

        info!(
            path = %path.display(),
            fs_type = repository.repository_type.fs_type(),
            "created repository"
        );
        Ok(path)
    }

    /// Rename `old_name` to `new_name` under `root`
    pub async fn move_repository(&self, root: &Path, old_name: &str, new_name: &str) -> SvnResult<PathBuf> {
        validate_name(old_name)?;
        validate_name(new_name)?;

        let from = root.join(old_name);
        let to = root.join(new_name);
        if !is_dir(&from).await {
            return Err(SvnError::filesystem_error(
                format!("repository '{}' does not exist", old_name),
                Some(from),
            ));
        }
        if tokio::fs::try_exists(&to).await.unwrap_or(false) {
            return Err(SvnError::validation_error(
                "new_name",
                format!("'{}' already exists", to.display()),
            ));
        }

        tokio::fs::rename(&from, &to)
            .await
            .with_filesystem_error("failed to move repository", Some(from.clone()))?;
        info!(from = %from.display(), to = %to.display(), "moved repository");
        Ok(to)
    }

    /// Remove the repository directory `root/name` and everything in it
    pub async fn delete_repository(&self, root: &Path, name: &str) -> SvnResult<()> {
        validate_name(name)?;

        let path = root.join(name);
        if !is_dir(&path).await {
            return Err(SvnError::filesystem_error(
                format!("repository '{}' does not exist", name),
                Some(path),
            ));
        }

        tokio::fs::remove_dir_all(&path)
            .await
            .with_filesystem_error("failed to delete repository", Some(path.clone()))?;
        info!(path = %path.display(), "deleted repository");
        Ok(())
    }

    /// Stop any running `svnserve` and start a daemon serving `root`.
    ///
    /// Only POSIX hosts are handled; on Windows svnserve runs as a service
    /// that has to be restarted by hand.
    pub async fn restart_svnserve(&self, root: &Path) -> SvnResult<()> {
        match &self.platform {
            Platform::Posix => {}
            Platform::Windows => {
                return Err(SvnError::unsupported_platform(
                    "windows",
                    "restart svnserve (restart the svnserve service manually)",
                ))
            }
            Platform::Unsupported(os) => {
                return Err(SvnError::unsupported_platform(os.clone(), "restart svnserve"))
            }
        }

        // No running server is not an error
        let stop = join_args(&["pkill", "-x", self.svnserve_executable.as_str()])?;
        let stopped = self
            .runner
            .execute(&CommandSpec::new(stop).with_ignore_error(true), false)
            .await?;
        debug!(exit_code = ?stopped.exit_code, "stopped svnserve");

        let root_arg = root.to_string_lossy();
        let start = join_args(&[
            self.svnserve_executable.as_str(),
            "-d",
            "-r",
            root_arg.as_ref(),
        ])?;
        self.run(CommandSpec::new(start)).await?;
        info!(root = %root.display(), "started svnserve");
        Ok(())
    }

    async fn run(&self, spec: CommandSpec) -> SvnResult<String> {
        let result = self.runner.execute(&spec, true).await?;
        decode_string(&result, spec.ignore_error)
    }
}

fn validate_name(name: &str) -> SvnResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(SvnError::validation_error("name", "repository name is required"));
    }
    if trimmed != name || trimmed.contains(['/', '\\']) || trimmed == "." || trimmed == ".." {
        return Err(SvnError::validation_error(
            "name",
            format!("'{}' is not a valid repository name", name),
        ));
    }
    Ok(())
}

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|metadata| metadata.is_dir())
        .unwrap_or(false)
}

async fn backup_conf_files(conf: &Path) -> SvnResult<()> {
    let backup = conf.join("backup");
    tokio::fs::create_dir_all(&backup)
        .await
        .with_filesystem_error("failed to create backup directory", Some(backup.clone()))?;

    for file in CONF_FILES {
        let source = conf.join(file);
        if !tokio::fs::try_exists(&source).await.unwrap_or(false) {
            continue;
        }
        tokio::fs::copy(&source, backup.join(file))
            .await
            .with_filesystem_error("failed to back up configuration", Some(source.clone()))?;
    }
    Ok(())
}
