use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Access protocol used to reach a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SvnProtocol {
    /// svnserve (`svn://`)
    Svn,
    /// svnserve tunneled over ssh (`svn+ssh://`)
    SvnSsh,
    /// Apache mod_dav_svn (`http://`)
    Http,
    /// Apache mod_dav_svn over TLS (`https://`)
    Https,
    /// Direct repository access (`file://`)
    File,
}

impl Default for SvnProtocol {
    fn default() -> Self {
        Self::Svn
    }
}

impl SvnProtocol {
    /// URL scheme for this protocol
    pub fn scheme(&self) -> &'static str {
        match self {
            SvnProtocol::Svn => "svn",
            SvnProtocol::SvnSsh => "svn+ssh",
            SvnProtocol::Http => "http",
            SvnProtocol::Https => "https",
            SvnProtocol::File => "file",
        }
    }

    /// Detect the protocol of a repository URL
    pub fn from_url(url: &str) -> Result<Self, SvnProtocolError> {
        let parsed = Url::parse(url).map_err(|_| SvnProtocolError::InvalidUrl(url.to_string()))?;
        parsed.scheme().parse()
    }

    /// Build the root URL of repository `name` served from `host`
    ///
    /// For `file://` the host is the local directory holding the repositories.
    pub fn repository_url(&self, host: &str, name: &str) -> String {
        let host = host.trim_end_matches('/');
        match self {
            SvnProtocol::File => {
                let host = host.replace('\\', "/");
                if host.starts_with('/') {
                    format!("file://{}/{}", host, name)
                } else {
                    format!("file:///{}/{}", host, name)
                }
            }
            _ => format!("{}://{}/{}", self.scheme(), host, name),
        }
    }
}

impl fmt::Display for SvnProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.scheme())
    }
}

impl FromStr for SvnProtocol {
    type Err = SvnProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "svn" => Ok(SvnProtocol::Svn),
            "svn+ssh" => Ok(SvnProtocol::SvnSsh),
            "http" => Ok(SvnProtocol::Http),
            "https" => Ok(SvnProtocol::Https),
            "file" => Ok(SvnProtocol::File),
            _ => Err(SvnProtocolError::UnsupportedScheme(s.to_string())),
        }
    }
}

/// Errors that can occur when working with repository URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SvnProtocolError {
    /// The scheme is not one Subversion speaks
    UnsupportedScheme(String),
    /// The text is not a URL at all
    InvalidUrl(String),
}

impl fmt::Display for SvnProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SvnProtocolError::UnsupportedScheme(scheme) => {
                write!(
                    f,
                    "Unsupported protocol: '{}'. Supported protocols are: svn, svn+ssh, http, https, file",
                    scheme
                )
            }
            SvnProtocolError::InvalidUrl(url) => write!(f, "Invalid repository URL: '{}'", url),
        }
    }
}

impl std::error::Error for SvnProtocolError {}
