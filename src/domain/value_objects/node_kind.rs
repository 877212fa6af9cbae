use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a versioned node as reported by `svn list` / `svn info`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Directory
    Dir,
    /// File
    File,
    /// Anything else the tool reports
    None,
}

impl NodeKind {
    /// Map the `kind` attribute of an `<entry>` element
    pub fn from_attribute(kind: Option<&str>) -> Self {
        match kind {
            Some("file") => NodeKind::File,
            Some("dir") => NodeKind::Dir,
            _ => NodeKind::None,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, NodeKind::File)
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, NodeKind::Dir)
    }
}

impl Default for NodeKind {
    fn default() -> Self {
        Self::None
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Dir => write!(f, "dir"),
            NodeKind::File => write!(f, "file"),
            NodeKind::None => write!(f, "none"),
        }
    }
}
