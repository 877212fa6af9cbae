use crate::common::error::SvnError;
use crate::common::result::{ResultExt, SvnResult};
use crate::infrastructure::process::{
    CommandExecutor, ExecutionMode, OutputCharset, Platform, DEFAULT_TIMEOUT,
};
use crate::infrastructure::svn::admin::{
    default_repository_root, SVNADMIN_EXECUTABLE, SVNSERVE_EXECUTABLE,
};
use crate::infrastructure::svn::client::SVN_EXECUTABLE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use validator::Validate;

/// File name under the user configuration directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Settings shared by the client, the admin and the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SvnApiConfig {
    /// `svn` executable name or path
    #[validate(length(min = 1))]
    pub svn_executable: String,

    /// `svnadmin` executable name or path
    #[validate(length(min = 1))]
    pub svnadmin_executable: String,

    /// `svnserve` executable name or path
    #[validate(length(min = 1))]
    pub svnserve_executable: String,

    /// Timeout for commands without their own, in seconds
    #[validate(range(min = 1, max = 3600))]
    pub default_timeout_secs: u64,

    /// Blocking or async process supervision
    pub execution_mode: ExecutionMode,

    /// Encoding of command output
    pub charset: OutputCharset,

    /// Directory holding local repositories
    pub repository_root: PathBuf,

    /// Root URL used when the CLI is not given one
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub server_url: Option<String>,
}

impl Default for SvnApiConfig {
    fn default() -> Self {
        Self {
            svn_executable: SVN_EXECUTABLE.to_string(),
            svnadmin_executable: SVNADMIN_EXECUTABLE.to_string(),
            svnserve_executable: SVNSERVE_EXECUTABLE.to_string(),
            default_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            execution_mode: ExecutionMode::default(),
            charset: OutputCharset::default(),
            repository_root: default_repository_root(),
            server_url: None,
        }
    }
}

impl SvnApiConfig {
    pub fn default_timeout(&self) -> Duration {
        Duration::from_secs(self.default_timeout_secs)
    }

    /// Executor for this host with the configured timeout and mode
    pub fn executor(&self) -> CommandExecutor {
        CommandExecutor::new(Platform::detect())
            .with_default_timeout(self.default_timeout())
            .with_mode(self.execution_mode)
    }
}

/// Reads and writes `SvnApiConfig` as YAML
#[derive(Debug, Clone, Default)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// `<config dir>/svnapi/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("svnapi").join(CONFIG_FILE_NAME))
    }

    /// Load and validate the configuration; an absent file yields defaults
    pub fn load<P: AsRef<Path>>(&self, path: P) -> SvnResult<SvnApiConfig> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(SvnApiConfig::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_filesystem_error("failed to read configuration", Some(path.to_path_buf()))?;
        let config: SvnApiConfig = serde_yaml::from_str(&contents).map_err(|e| {
            SvnError::config_error_with_source(format!("invalid YAML in {}", path.display()), e)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate and write the configuration, creating parent directories
    pub fn save<P: AsRef<Path>>(&self, path: P, config: &SvnApiConfig) -> SvnResult<()> {
        let path = path.as_ref();
        config.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_filesystem_error(
                "failed to create configuration directory",
                Some(parent.to_path_buf()),
            )?;
        }

        let yaml = serde_yaml::to_string(config)?;
        std::fs::write(path, yaml)
            .with_filesystem_error("failed to write configuration", Some(path.to_path_buf()))?;
        Ok(())
    }
}
