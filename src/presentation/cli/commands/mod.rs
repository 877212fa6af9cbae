pub mod client;
pub mod repo;
