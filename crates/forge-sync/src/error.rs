use std::path::PathBuf;

/// Errors produced by the sync and provisioning pipeline.
///
/// A missing cache file is *not* an error for reads — `ProjectCache::load`
/// treats it as the documented "no cache yet" state. `CacheMissing` is only
/// raised where a completed reload is a hard precondition (provisioning).
#[derive(Debug, thiserror::Error)]
pub enum ForgeError {
    #[error("network error: {0}")]
    Network(String),

    #[error("project cache at {path} is corrupt: {reason}")]
    CacheCorrupt { path: PathBuf, reason: String },

    #[error("project cache not found at {0}; run the reload stage first")]
    CacheMissing(PathBuf),

    #[error("I/O error: {0}")]
    Io(String),
}
