//! Common test utilities and helpers
//!
//! XML fixtures captured from `svn --xml` and a fake `svn` executable that
//! lets the client and the CLI run end to end without a server.

#![allow(dead_code)]

pub mod test_fixtures;
pub mod test_helpers;
