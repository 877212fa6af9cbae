/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - Process execution (tokenizing, platform shells, timeouts)
/// - `svn` / `svnadmin` integration (classification, decoding, XML parsing)
/// - File system operations (configuration files)
pub mod filesystem;
pub mod process;
pub mod svn;

// Re-export commonly used types
pub use filesystem::{ConfigStore, SvnApiConfig};
pub use process::{CommandExecutor, CommandRunner, CommandSpec, ExecutionMode, ExecutionResult};
pub use svn::{SvnAdmin, SvnClient, SvnClientOperations};
