use forge_sync::{ForgeBackend, ForgeError, WebhookSpec, filter_by_topic};

use crate::cache::ProjectCache;

/// Counts from one provisioning pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionReport {
    /// Hooks created during this pass.
    pub created: u64,
    /// Projects that already had a hook pointing at the callback URL.
    pub existing: u64,
}

/// Reload stage: fetch the authoritative project list, filter by topic, sort
/// by qualified path, and persist the snapshot atomically.
///
/// Succeed completely or change nothing: any fetch failure aborts before the
/// cache is touched, so the previous good snapshot survives.
pub async fn refresh_projects(
    backend: &dyn ForgeBackend,
    topic: Option<&str>,
    cache: &ProjectCache,
) -> Result<usize, ForgeError> {
    let fetched = backend.fetch_projects().await?;

    let mut projects = filter_by_topic(topic, fetched, |p| &p.topics);
    projects.sort_by(|a, b| a.path_with_namespace.cmp(&b.path_with_namespace));

    cache.save(&projects)?;
    log::info!(
        "cached {} projects to {}",
        projects.len(),
        cache.path().display()
    );

    Ok(projects.len())
}

/// Provision stage: ensure every cached project has a webhook pointing at the
/// platform's change-hook endpoint.
///
/// Requires a previously persisted cache (`CacheMissing` otherwise) — the
/// reload stage must have completed at least once. For each project the
/// remote hooks are listed and matched by exact URL; a match means no
/// mutation, so re-running after success performs zero remote writes. Hooks
/// are matched by URL only: an existing hook with a rotated secret or a
/// different SSL flag is still treated as provisioned.
///
/// The first listing or creation failure aborts the whole run. Re-invocation
/// is safe because of the idempotency above.
pub async fn provision_hooks(
    backend: &dyn ForgeBackend,
    cache: &ProjectCache,
    callback_base: &str,
    webhook_secret: &str,
) -> Result<ProvisionReport, ForgeError> {
    if !cache.exists() {
        return Err(ForgeError::CacheMissing(cache.path().to_path_buf()));
    }

    let projects = cache.load()?;
    let spec = WebhookSpec::for_callback(callback_base, backend.hook_kind(), webhook_secret);

    let mut report = ProvisionReport::default();

    for project in &projects {
        let hooks = backend.fetch_hooks(project.id).await?;

        if hooks.iter().any(|hook| hook.url == spec.url) {
            log::info!("hook for {} already exists", backend.describe_project(project));
            report.existing += 1;
            continue;
        }

        log::info!("creating hook for {}", backend.describe_project(project));
        backend.create_hook(project.id, &spec).await?;
        report.created += 1;
    }

    Ok(report)
}
