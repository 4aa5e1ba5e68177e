use std::sync::Arc;

use crate::error::ForgeError;
use crate::hook::{HookRecord, WebhookSpec};
use crate::project::ProjectRecord;

/// A source-hosting service the platform tracks projects on.
///
/// The pipeline stages are written against this trait; GitLab is one concrete
/// implementation. All calls are pure reads except `create_hook`.
#[async_trait::async_trait]
pub trait ForgeBackend: Send + Sync {
    /// Literal backend identifier (e.g. "gitlab"). Forms the final path
    /// segment of the platform's change-hook callback URL.
    fn hook_kind(&self) -> &str;

    /// Human-readable label for a project, used in log output.
    fn describe_project(&self, project: &ProjectRecord) -> String;

    /// Fetch every project the configured credentials can administer.
    async fn fetch_projects(&self) -> Result<Vec<ProjectRecord>, ForgeError>;

    /// List the webhooks currently configured on a project.
    async fn fetch_hooks(&self, project_id: u64) -> Result<Vec<HookRecord>, ForgeError>;

    /// Create a webhook on a project.
    async fn create_hook(&self, project_id: u64, spec: &WebhookSpec) -> Result<(), ForgeError>;
}

#[async_trait::async_trait]
impl<T: ForgeBackend + ?Sized> ForgeBackend for Arc<T> {
    fn hook_kind(&self) -> &str {
        (**self).hook_kind()
    }

    fn describe_project(&self, project: &ProjectRecord) -> String {
        (**self).describe_project(project)
    }

    async fn fetch_projects(&self) -> Result<Vec<ProjectRecord>, ForgeError> {
        (**self).fetch_projects().await
    }

    async fn fetch_hooks(&self, project_id: u64) -> Result<Vec<HookRecord>, ForgeError> {
        (**self).fetch_hooks(project_id).await
    }

    async fn create_hook(&self, project_id: u64, spec: &WebhookSpec) -> Result<(), ForgeError> {
        (**self).create_hook(project_id, spec).await
    }
}
