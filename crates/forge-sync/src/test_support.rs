use std::collections::HashMap;
use std::sync::Mutex;

use crate::{ForgeBackend, ForgeError, HookRecord, Namespace, NamespaceKind, ProjectRecord, WebhookSpec};

/// Build a group-owned project with the given topics, filling the remaining
/// fields from the qualified path.
pub fn sample_project(id: u64, path_with_namespace: &str, topics: &[&str]) -> ProjectRecord {
    let (namespace, path) = path_with_namespace
        .split_once('/')
        .unwrap_or(("acme", path_with_namespace));

    ProjectRecord {
        id,
        name_with_namespace: path_with_namespace.replace('/', " / "),
        path: path.to_owned(),
        path_with_namespace: path_with_namespace.to_owned(),
        ssh_url_to_repo: format!("git@forge.example.com:{path_with_namespace}.git"),
        web_url: format!("https://forge.example.com/{path_with_namespace}"),
        namespace: Namespace {
            path: namespace.to_owned(),
            kind: NamespaceKind::Group,
        },
        default_branch: "main".to_owned(),
        topics: topics.iter().map(|t| (*t).to_owned()).collect(),
    }
}

/// In-memory backend for testing. Serves a fixed project list, tracks hooks
/// per project, and counts every remote call so tests can assert idempotency.
pub struct InMemoryBackend {
    projects: Vec<ProjectRecord>,
    hooks: Mutex<HashMap<u64, Vec<HookRecord>>>,
    next_hook_id: Mutex<u64>,
    pub fail_fetch_projects: bool,
    pub fail_create_hook: bool,
    fetch_hooks_calls: Mutex<u64>,
    create_hook_calls: Mutex<u64>,
}

impl InMemoryBackend {
    pub fn new(projects: Vec<ProjectRecord>) -> Self {
        Self {
            projects,
            hooks: Mutex::new(HashMap::new()),
            next_hook_id: Mutex::new(1),
            fail_fetch_projects: false,
            fail_create_hook: false,
            fetch_hooks_calls: Mutex::new(0),
            create_hook_calls: Mutex::new(0),
        }
    }

    /// Pre-seed an existing remote hook on a project.
    pub fn add_hook(&self, project_id: u64, url: &str) {
        let mut next_id = self.next_hook_id.lock().unwrap();
        let id = *next_id;
        *next_id += 1;

        self.hooks.lock().unwrap().entry(project_id).or_default().push(HookRecord {
            id,
            url: url.to_owned(),
        });
    }

    pub fn hooks_for(&self, project_id: u64) -> Vec<HookRecord> {
        self.hooks
            .lock()
            .unwrap()
            .get(&project_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn fetch_hooks_calls(&self) -> u64 {
        *self.fetch_hooks_calls.lock().unwrap()
    }

    pub fn create_hook_calls(&self) -> u64 {
        *self.create_hook_calls.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl ForgeBackend for InMemoryBackend {
    fn hook_kind(&self) -> &str {
        "gitlab"
    }

    fn describe_project(&self, project: &ProjectRecord) -> String {
        format!("project {} (id {})", project.path_with_namespace, project.id)
    }

    async fn fetch_projects(&self) -> Result<Vec<ProjectRecord>, ForgeError> {
        if self.fail_fetch_projects {
            return Err(ForgeError::Network("connection reset by peer".to_owned()));
        }
        Ok(self.projects.clone())
    }

    async fn fetch_hooks(&self, project_id: u64) -> Result<Vec<HookRecord>, ForgeError> {
        *self.fetch_hooks_calls.lock().unwrap() += 1;
        Ok(self.hooks_for(project_id))
    }

    async fn create_hook(&self, project_id: u64, spec: &WebhookSpec) -> Result<(), ForgeError> {
        *self.create_hook_calls.lock().unwrap() += 1;
        if self.fail_create_hook {
            return Err(ForgeError::Network("HTTP 503".to_owned()));
        }
        self.add_hook(project_id, &spec.url);
        Ok(())
    }
}
