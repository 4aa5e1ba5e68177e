use serde::{Deserialize, Serialize};

/// What kind of namespace owns a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamespaceKind {
    User,
    Group,
}

/// The namespace a project lives under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    pub path: String,
    pub kind: NamespaceKind,
}

/// Snapshot of one upstream project at refresh time.
///
/// `id` is the stable identity across refreshes; every other field is fully
/// replaced on each reload rather than merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: u64,
    pub name_with_namespace: String,
    pub path: String,
    pub path_with_namespace: String,
    pub ssh_url_to_repo: String,
    pub web_url: String,
    pub namespace: Namespace,
    pub default_branch: String,
    #[serde(default)]
    pub topics: Vec<String>,
}

impl ProjectRecord {
    /// Whether the project is owned by an organization-level (group)
    /// namespace rather than a personal one. Drives downstream
    /// access-control decisions in the host platform.
    pub fn belongs_to_org(&self) -> bool {
        self.namespace.kind == NamespaceKind::Group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_kind_uses_lowercase_wire_names() {
        let group: NamespaceKind = serde_json::from_str(r#""group""#).unwrap();
        assert_eq!(group, NamespaceKind::Group);

        let user: NamespaceKind = serde_json::from_str(r#""user""#).unwrap();
        assert_eq!(user, NamespaceKind::User);

        assert_eq!(serde_json::to_string(&group).unwrap(), r#""group""#);
    }

    #[test]
    fn group_namespace_belongs_to_org() {
        let record = crate::test_support::sample_project(1, "acme/widget", &[]);
        assert!(record.belongs_to_org());

        let mut personal = crate::test_support::sample_project(2, "alice/dotfiles", &[]);
        personal.namespace.kind = NamespaceKind::User;
        assert!(!personal.belongs_to_org());
    }

    #[test]
    fn missing_topics_decode_as_empty() {
        let record: ProjectRecord = serde_json::from_str(
            r#"{
                "id": 7,
                "name_with_namespace": "Acme / Widget",
                "path": "widget",
                "path_with_namespace": "acme/widget",
                "ssh_url_to_repo": "git@forge.example.com:acme/widget.git",
                "web_url": "https://forge.example.com/acme/widget",
                "namespace": {"path": "acme", "kind": "group"},
                "default_branch": "main"
            }"#,
        )
        .unwrap();

        assert!(record.topics.is_empty());
        assert_eq!(record.id, 7);
    }
}
