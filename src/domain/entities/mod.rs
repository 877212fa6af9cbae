pub mod commit;
pub mod entry;
pub mod lock;
pub mod log_entry;
pub mod repository;

pub use commit::Commit;
pub use entry::Entry;
pub use lock::Lock;
pub use log_entry::LogEntry;
pub use repository::{SvnRepository, SvnUser};
