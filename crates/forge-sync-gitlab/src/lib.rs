pub mod backend;
pub mod client;

pub use backend::GitlabBackend;
pub use client::GitlabClient;
