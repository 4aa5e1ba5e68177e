use std::io::Write;
use std::path::{Path, PathBuf};

use forge_sync::{ForgeError, ProjectRecord, filter_by_topic};

/// A file-backed store holding the platform's view of upstream projects.
///
/// The on-disk document is a JSON array of `ProjectRecord`, sorted ascending
/// by qualified path. Writes are atomic: a temp file in the same directory is
/// written, flushed, and renamed over the target, so readers only ever see
/// the previous or the new complete snapshot.
pub struct ProjectCache {
    path: PathBuf,
}

impl ProjectCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a completed reload has ever persisted a snapshot here.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the current snapshot.
    ///
    /// A missing file is the documented "no cache yet" state and yields an
    /// empty list; a file that exists but does not decode is `CacheCorrupt`.
    pub fn load(&self) -> Result<Vec<ProjectRecord>, ForgeError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let bytes = std::fs::read(&self.path).map_err(|e| ForgeError::Io(e.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|e| ForgeError::CacheCorrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Read the snapshot the way the host's project-loading routine does:
    /// filtered by topic and sorted by qualified path.
    pub fn load_cached_projects(
        &self,
        topic: Option<&str>,
    ) -> Result<Vec<ProjectRecord>, ForgeError> {
        let mut projects = filter_by_topic(topic, self.load()?, |p| &p.topics);
        projects.sort_by(|a, b| a.path_with_namespace.cmp(&b.path_with_namespace));
        Ok(projects)
    }

    /// Replace the snapshot atomically.
    ///
    /// A crash before the rename leaves the previous snapshot intact; a crash
    /// after leaves the new one. No partial document is ever visible.
    pub fn save(&self, records: &[ProjectRecord]) -> Result<(), ForgeError> {
        let dir = self.path.parent().filter(|p| !p.as_os_str().is_empty());
        let dir = dir.unwrap_or_else(|| Path::new("."));

        let mut tmp =
            tempfile::NamedTempFile::new_in(dir).map_err(|e| ForgeError::Io(e.to_string()))?;

        serde_json::to_writer_pretty(&mut tmp, records)
            .map_err(|e| ForgeError::Io(e.to_string()))?;
        tmp.write_all(b"\n").map_err(|e| ForgeError::Io(e.to_string()))?;
        tmp.as_file().sync_all().map_err(|e| ForgeError::Io(e.to_string()))?;

        tmp.persist(&self.path).map_err(|e| ForgeError::Io(e.to_string()))?;

        Ok(())
    }
}
