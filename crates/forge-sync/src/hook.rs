use serde::{Deserialize, Serialize};

/// A webhook as it exists on the remote forge.
///
/// Only the fields the reconciliation logic inspects are decoded; the forge
/// returns many more.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookRecord {
    pub id: u64,
    pub url: String,
}

/// The desired state of a project's platform webhook.
///
/// SSL verification is always on and no optional event classes are requested;
/// the forge's default push/merge delivery is the only traffic the platform
/// wants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookSpec {
    pub url: String,
    pub token: String,
    pub enable_ssl_verification: bool,
}

impl WebhookSpec {
    /// Build the spec for the platform's change-hook endpoint:
    /// `{callback_base}change_hook/{hook_kind}`.
    pub fn for_callback(callback_base: &str, hook_kind: &str, token: impl Into<String>) -> Self {
        let base = callback_base.trim_end_matches('/');
        Self {
            url: format!("{base}/change_hook/{hook_kind}"),
            token: token.into(),
            enable_ssl_verification: true,
        }
    }
}
