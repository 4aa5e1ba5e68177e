pub mod cache;
pub mod pipeline;

pub use cache::ProjectCache;
pub use pipeline::{ProvisionReport, provision_hooks, refresh_projects};
