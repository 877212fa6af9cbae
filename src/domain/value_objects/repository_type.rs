use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Backend storage format of a repository (`svnadmin create --fs-type`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryType {
    /// FSFS, the default backend
    Fsfs,
    /// Berkeley DB
    Bdb,
}

impl Default for RepositoryType {
    fn default() -> Self {
        Self::Fsfs
    }
}

impl RepositoryType {
    /// Value passed to `--fs-type`
    pub fn fs_type(&self) -> &'static str {
        match self {
            RepositoryType::Fsfs => "fsfs",
            RepositoryType::Bdb => "bdb",
        }
    }
}

impl fmt::Display for RepositoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fs_type())
    }
}

impl FromStr for RepositoryType {
    type Err = RepositoryTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fsfs" => Ok(RepositoryType::Fsfs),
            "bdb" | "berkeley" | "berkeleydb" => Ok(RepositoryType::Bdb),
            _ => Err(RepositoryTypeError(s.to_string())),
        }
    }
}

/// The specified repository type is not supported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryTypeError(pub String);

impl fmt::Display for RepositoryTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unsupported repository type: '{}'. Supported types are: fsfs, bdb",
            self.0
        )
    }
}

impl std::error::Error for RepositoryTypeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_type_from_str() {
        assert_eq!("fsfs".parse::<RepositoryType>().unwrap(), RepositoryType::Fsfs);
        assert_eq!("FSFS".parse::<RepositoryType>().unwrap(), RepositoryType::Fsfs);
        assert_eq!("bdb".parse::<RepositoryType>().unwrap(), RepositoryType::Bdb);
        assert!("git".parse::<RepositoryType>().is_err());
    }

    #[test]
    fn test_fs_type() {
        assert_eq!(RepositoryType::default().fs_type(), "fsfs");
        assert_eq!(RepositoryType::Bdb.to_string(), "bdb");
    }
}
