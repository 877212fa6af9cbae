//! # svnapi - typed access to Subversion
//!
//! `svnapi` drives the `svn`, `svnadmin` and `svnserve` command-line tools and
//! turns what they print into typed values. Repository lifecycle (create,
//! move, delete), repository operations (mkdir, list, lock, diff, cat, ...)
//! and metadata queries (head and last-changed revisions, commit info) are
//! plain async calls instead of hand-built shell invocations.
//!
//! ## Architecture
//!
//! The crate is organized using clean architecture principles:
//!
//! - [`domain`]: Entries, commits, locks, revisions and repository handles
//! - [`infrastructure`]: Process execution, `svn` output handling, configuration
//! - [`presentation`]: CLI interface and user interaction
//! - [`common`]: Shared error type and helpers
//!
//! ## Execution pipeline
//!
//! Every call follows the same path:
//!
//! 1. A façade ([`infrastructure::svn::SvnClient`] or
//!    [`infrastructure::svn::SvnAdmin`]) builds a
//!    [`infrastructure::process::CommandSpec`].
//! 2. [`infrastructure::process::CommandExecutor`] either tokenizes the
//!    command or hands it to the platform shell, then runs it under a timeout
//!    in blocking or async mode. A timed out process is killed, never leaked.
//! 3. [`infrastructure::svn::classifier`] turns stderr content into
//!    [`SvnError::CommandExecution`].
//! 4. [`infrastructure::svn::decoder`] decodes stdout as text, an integer or
//!    XML, and [`infrastructure::svn::parser`] maps XML to domain records.
//!
//! ## Error Handling
//!
//! - [`common::error::SvnError`]: Main error type. Tool-reported failures
//!   ([`SvnError::is_tool_error`]) are distinct from timeouts, spawn failures
//!   and unparseable output.
//! - [`common::result::SvnResult`]: Type alias for `Result<T, SvnError>`
//!
//! ## Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use svnapi::domain::entities::SvnUser;
//! use svnapi::domain::value_objects::Revision;
//! use svnapi::infrastructure::process::CommandExecutor;
//! use svnapi::infrastructure::svn::{SvnClient, SvnClientOperations};
//!
//! # async fn example() -> svnapi::Result<()> {
//! let client = SvnClient::new("svn://localhost/marssvn", Arc::new(CommandExecutor::default()))
//!     .with_user(SvnUser::new("admin", "secret"));
//!
//! for entry in client.list("trunk", Revision::Head).await? {
//!     println!("{} {:?} r{}", entry.path, entry.kind, entry.head_revision);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::SvnError;
pub use crate::common::result::SvnResult as Result;
