use anyhow::Result;
use forge_sync::{ForgeBackend, Reconfigure};
use forge_sync_store::{ProjectCache, provision_hooks};

/// Run the provision stage and print the outcome.
///
/// On success the host is asked to reconfigure so it picks up the newly
/// hooked projects; a failed provisioning pass never fires the trigger.
pub async fn run(
    backend: &dyn ForgeBackend,
    cache: &ProjectCache,
    callback_base_url: &str,
    webhook_secret: &str,
    reconfigure: &dyn Reconfigure,
) -> Result<()> {
    let report = provision_hooks(backend, cache, callback_base_url, webhook_secret).await?;
    println!(
        "Created {} hooks ({} already present).",
        report.created, report.existing
    );

    reconfigure.request_reconfiguration()?;
    Ok(())
}
