pub mod node_kind;
pub mod repository_type;
pub mod revision;
pub mod svn_protocol;

pub use node_kind::NodeKind;
pub use repository_type::RepositoryType;
pub use revision::Revision;
pub use svn_protocol::SvnProtocol;
