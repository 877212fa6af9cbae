use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SvnError {
    #[error("Malformed command: {message} (command: {command})")]
    MalformedCommand { message: String, command: String },

    #[error("Unsupported platform '{os}' for operation: {operation}")]
    UnsupportedPlatform { os: String, operation: String },

    #[error("Command timed out after {timeout_ms} ms: {command}")]
    Timeout {
        command: String,
        timeout_ms: u64,
        pid: Option<u32>,
    },

    #[error("{message}")]
    CommandExecution {
        message: String,
        error_code: Option<String>,
        exit_code: Option<i32>,
    },

    #[error("Expected a number in command output, got '{value}'")]
    NumericParse {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Malformed command output: {message}")]
    MalformedOutput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Interrupted while waiting for command: {message}")]
    Interrupted { message: String },

    #[error("Process operation failed for '{command}': {message}")]
    Process {
        command: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Validation error: {field} - {message}")]
    Validation {
        field: String,
        message: String,
        error_code: Option<String>,
    },

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("File system operation failed: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },
}

impl SvnError {
    pub fn malformed_command(message: impl Into<String>, command: impl Into<String>) -> Self {
        Self::MalformedCommand {
            message: message.into(),
            command: command.into(),
        }
    }

    pub fn unsupported_platform(os: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::UnsupportedPlatform {
            os: os.into(),
            operation: operation.into(),
        }
    }

    pub fn timeout(command: impl Into<String>, timeout_ms: u64, pid: Option<u32>) -> Self {
        Self::Timeout {
            command: command.into(),
            timeout_ms,
            pid,
        }
    }

    pub fn command_execution(message: impl Into<String>, error_code: Option<String>) -> Self {
        Self::CommandExecution {
            message: message.into(),
            error_code,
            exit_code: None,
        }
    }

    pub fn numeric_parse(value: impl Into<String>, source: std::num::ParseIntError) -> Self {
        Self::NumericParse {
            value: value.into(),
            source,
        }
    }

    pub fn malformed_output(message: impl Into<String>) -> Self {
        Self::MalformedOutput {
            message: message.into(),
            source: None,
        }
    }

    pub fn malformed_output_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::MalformedOutput {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn interrupted(message: impl Into<String>) -> Self {
        Self::Interrupted {
            message: message.into(),
        }
    }

    pub fn process_error(
        command: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::Process {
            command: command.into(),
            message: message.into(),
            source,
        }
    }

    pub fn validation_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
            error_code: None,
        }
    }

    pub fn validation_error_with_code(
        field: impl Into<String>,
        message: impl Into<String>,
        error_code: impl Into<String>,
    ) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
            error_code: Some(error_code.into()),
        }
    }

    pub fn config_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn filesystem_error(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::FileSystem {
            message: message.into(),
            path,
            source: None,
        }
    }

    pub fn filesystem_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path,
            source: Some(source),
        }
    }

    /// Short code attached to the error, if any (`E170001`, `EC0001`, ...)
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::CommandExecution { error_code, .. } | Self::Validation { error_code, .. } => {
                error_code.as_deref()
            }
            _ => None,
        }
    }

    /// Whether the wrapped tool itself reported the failure.
    ///
    /// Everything else (timeouts, unparseable output, spawn failures) is an
    /// infrastructure failure of this layer.
    pub fn is_tool_error(&self) -> bool {
        matches!(self, Self::CommandExecution { .. })
    }
}

impl From<std::io::Error> for SvnError {
    fn from(error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::Interrupted {
            return Self::interrupted(error.to_string());
        }
        Self::filesystem_error_with_source("File system operation failed", None, error)
    }
}

impl From<serde_yaml::Error> for SvnError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::config_error_with_source("YAML serialization failed", error)
    }
}

impl From<validator::ValidationErrors> for SvnError {
    fn from(error: validator::ValidationErrors) -> Self {
        Self::config_error_with_source("Configuration validation failed", error)
    }
}

impl From<tokio::task::JoinError> for SvnError {
    fn from(error: tokio::task::JoinError) -> Self {
        Self::interrupted(error.to_string())
    }
}
