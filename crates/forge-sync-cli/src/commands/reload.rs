use anyhow::Result;
use forge_sync::ForgeBackend;
use forge_sync_store::{ProjectCache, refresh_projects};

/// Run the reload stage and print the outcome.
pub async fn run(
    backend: &dyn ForgeBackend,
    cache: &ProjectCache,
    topic: Option<&str>,
) -> Result<()> {
    let count = refresh_projects(backend, topic, cache).await?;
    println!("Cached {count} projects.");
    Ok(())
}
