/// `svn` / `svnadmin` integration: error classification, output decoding,
/// XML parsing and the client and admin façades built on them
pub mod admin;
pub mod classifier;
pub mod client;
pub mod decoder;
pub mod parser;

pub use admin::{default_repository_root, SvnAdmin};
pub use client::{SvnClient, SvnClientOperations};
pub use parser::ListingContext;
