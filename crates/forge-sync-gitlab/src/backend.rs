use forge_sync::{ForgeBackend, ForgeError, HookRecord, ProjectRecord, WebhookSpec};
use serde::Serialize;

use crate::client::GitlabClient;

// Access level 40 is Maintainer. See https://docs.gitlab.com/api/members/#roles
const MIN_ACCESS_LEVEL: u32 = 40;
const PER_PAGE: u32 = 100;

/// Display name the created webhook carries in the GitLab UI.
const HOOK_NAME: &str = "forge-sync hook";

/// GitLab implementation of [`ForgeBackend`].
pub struct GitlabBackend {
    client: GitlabClient,
}

impl GitlabBackend {
    pub fn new(instance_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: GitlabClient::new(instance_url, token),
        }
    }
}

/// Wire body for `POST /projects/{id}/hooks`.
///
/// Every optional event class is switched off explicitly; the default
/// push/merge delivery is all the platform needs.
#[derive(Serialize)]
struct CreateHookRequest<'a> {
    name: &'a str,
    url: &'a str,
    enable_ssl_verification: bool,
    token: &'a str,
    confidential_issues_events: bool,
    confidential_note_events: bool,
    deployment_events: bool,
    feature_flag_events: bool,
    issues_events: bool,
    job_events: bool,
    merge_requests_events: bool,
    note_events: bool,
    pipeline_events: bool,
    releases_events: bool,
    wiki_page_events: bool,
    resource_access_token_events: bool,
}

impl<'a> CreateHookRequest<'a> {
    fn from_spec(spec: &'a WebhookSpec) -> Self {
        Self {
            name: HOOK_NAME,
            url: &spec.url,
            enable_ssl_verification: spec.enable_ssl_verification,
            token: &spec.token,
            confidential_issues_events: false,
            confidential_note_events: false,
            deployment_events: false,
            feature_flag_events: false,
            issues_events: false,
            job_events: false,
            merge_requests_events: false,
            note_events: false,
            pipeline_events: false,
            releases_events: false,
            wiki_page_events: false,
            resource_access_token_events: false,
        }
    }
}

#[async_trait::async_trait]
impl ForgeBackend for GitlabBackend {
    fn hook_kind(&self) -> &str {
        "gitlab"
    }

    fn describe_project(&self, project: &ProjectRecord) -> String {
        format!(
            "gitlab project {} (id {})",
            project.path_with_namespace, project.id
        )
    }

    async fn fetch_projects(&self) -> Result<Vec<ProjectRecord>, ForgeError> {
        let url = format!(
            "{}?min_access_level={MIN_ACCESS_LEVEL}&pagination=keyset&per_page={PER_PAGE}&order_by=id&sort=asc",
            self.client.api_url("projects")
        );
        self.client.get_paginated(&url).await
    }

    async fn fetch_hooks(&self, project_id: u64) -> Result<Vec<HookRecord>, ForgeError> {
        let url = self.client.api_url(&format!("projects/{project_id}/hooks"));
        self.client.get_paginated(&url).await
    }

    async fn create_hook(&self, project_id: u64, spec: &WebhookSpec) -> Result<(), ForgeError> {
        let url = self.client.api_url(&format!("projects/{project_id}/hooks"));
        self.client
            .post_json(&url, &CreateHookRequest::from_spec(spec))
            .await
    }
}
