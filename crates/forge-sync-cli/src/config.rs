use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Configuration for one synchronization run. Immutable once loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    /// Base URL of the forge instance, e.g. "https://gitlab.example.com".
    pub forge_url: String,
    /// Inline access token. Prefer `token_file` outside of tests.
    pub token: Option<String>,
    /// File holding the access token (trailing whitespace ignored).
    pub token_file: Option<PathBuf>,
    /// Inline webhook shared secret. Prefer `webhook_secret_file`.
    pub webhook_secret: Option<String>,
    pub webhook_secret_file: Option<PathBuf>,
    /// Only track projects carrying this topic. Absent means track all.
    pub topic: Option<String>,
    /// Where the project snapshot lives. Defaults under the user cache dir.
    pub project_cache_file: Option<PathBuf>,
    /// Base URL of the CI platform the created webhooks call back to.
    pub callback_base_url: String,
    /// PID file of the host process to signal after provisioning.
    pub host_pid_file: Option<PathBuf>,
}

impl SyncConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config at {}", path.display()))
    }

    pub fn token(&self) -> Result<String> {
        resolve_secret("token", self.token.as_deref(), self.token_file.as_deref())
    }

    pub fn webhook_secret(&self) -> Result<String> {
        resolve_secret(
            "webhook_secret",
            self.webhook_secret.as_deref(),
            self.webhook_secret_file.as_deref(),
        )
    }

    /// Resolve the cache path, creating its parent directory when the
    /// default location is used.
    pub fn cache_file(&self) -> Result<PathBuf> {
        if let Some(path) = &self.project_cache_file {
            return Ok(path.clone());
        }

        let base = dirs::cache_dir().context("could not determine cache directory")?;
        let dir = base.join("forge-sync");
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create cache directory: {}", dir.display()))?;
        Ok(dir.join("projects.json"))
    }
}

fn resolve_secret(label: &str, inline: Option<&str>, file: Option<&Path>) -> Result<String> {
    match (inline, file) {
        (Some(value), _) => Ok(value.to_owned()),
        (None, Some(path)) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {label} from {}", path.display()))?;
            Ok(contents.trim_end().to_owned())
        }
        (None, None) => anyhow::bail!("config must set `{label}` or `{label}_file`"),
    }
}

/// Default config file path: `~/.config/forge-sync/config.toml`
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("forge-sync").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parse_full_config_from_toml() {
        let toml_str = r#"
forge_url = "https://gitlab.example.com"
token = "glpat-abc"
webhook_secret = "s3cret"
topic = "ci"
project_cache_file = "/var/lib/forge-sync/projects.json"
callback_base_url = "https://ci.example.com/"
host_pid_file = "/run/ci/host.pid"
"#;
        let config: SyncConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.forge_url, "https://gitlab.example.com");
        assert_eq!(config.token().unwrap(), "glpat-abc");
        assert_eq!(config.webhook_secret().unwrap(), "s3cret");
        assert_eq!(config.topic.as_deref(), Some("ci"));
        assert_eq!(
            config.cache_file().unwrap(),
            PathBuf::from("/var/lib/forge-sync/projects.json")
        );
        assert_eq!(
            config.host_pid_file.as_deref(),
            Some(Path::new("/run/ci/host.pid"))
        );
    }

    #[test]
    fn topic_and_pid_file_are_optional() {
        let toml_str = r#"
forge_url = "https://gitlab.example.com"
token = "glpat-abc"
webhook_secret = "s3cret"
callback_base_url = "https://ci.example.com/"
"#;
        let config: SyncConfig = toml::from_str(toml_str).unwrap();
        assert!(config.topic.is_none());
        assert!(config.host_pid_file.is_none());
    }

    #[test]
    fn token_file_is_read_and_trimmed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "glpat-from-file").unwrap();

        let config: SyncConfig = toml::from_str(&format!(
            r#"
forge_url = "https://gitlab.example.com"
token_file = "{}"
webhook_secret = "s3cret"
callback_base_url = "https://ci.example.com/"
"#,
            file.path().display()
        ))
        .unwrap();

        assert_eq!(config.token().unwrap(), "glpat-from-file");
    }

    #[test]
    fn missing_token_and_token_file_is_an_error() {
        let config: SyncConfig = toml::from_str(
            r#"
forge_url = "https://gitlab.example.com"
webhook_secret = "s3cret"
callback_base_url = "https://ci.example.com/"
"#,
        )
        .unwrap();

        let err = config.token().unwrap_err();
        assert!(err.to_string().contains("token"));
    }
}
