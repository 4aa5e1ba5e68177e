pub mod backend;
pub mod error;
pub mod filter;
pub mod hook;
pub mod project;
pub mod reconfigure;

pub use backend::ForgeBackend;
pub use error::ForgeError;
pub use filter::filter_by_topic;
pub use hook::{HookRecord, WebhookSpec};
pub use project::{Namespace, NamespaceKind, ProjectRecord};
pub use reconfigure::{NoopReconfigure, Reconfigure};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
