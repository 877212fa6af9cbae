use crate::common::error::SvnError;
use crate::common::result::SvnResult;
use std::fmt;

/// Host operating system family, detected once and handed to the executor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    /// Windows family: commands are wrapped with `cmd /c`
    Windows,
    /// POSIX family: commands are wrapped with `/bin/sh -c`
    Posix,
    /// Anything else; OS-specific operations fail on it
    Unsupported(String),
}

impl Platform {
    /// Detect the platform of the running host
    pub fn detect() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Classify an OS name as reported by `std::env::consts::OS`
    pub fn from_os_name(os: &str) -> Self {
        let os = os.to_lowercase();
        if os.starts_with("win") {
            return Platform::Windows;
        }
        match os.as_str() {
            "linux" | "macos" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" | "solaris"
            | "illumos" | "android" | "ios" | "aix" | "haiku" => Platform::Posix,
            _ => Platform::Unsupported(os),
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Platform::Windows)
    }

    pub fn is_posix(&self) -> bool {
        matches!(self, Platform::Posix)
    }

    /// Program and arguments that run `command` through the platform shell
    pub fn shell_invocation(&self, command: &str) -> SvnResult<(String, Vec<String>)> {
        match self {
            Platform::Windows => Ok((
                "cmd".to_string(),
                vec!["/c".to_string(), command.to_string()],
            )),
            Platform::Posix => Ok((
                "/bin/sh".to_string(),
                vec!["-c".to_string(), command.to_string()],
            )),
            Platform::Unsupported(os) => Err(SvnError::unsupported_platform(
                os.clone(),
                "shell command execution",
            )),
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::detect()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => write!(f, "windows"),
            Platform::Posix => write!(f, "posix"),
            Platform::Unsupported(os) => write!(f, "{}", os),
        }
    }
}
