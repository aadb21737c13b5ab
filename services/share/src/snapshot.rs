//! Point-in-time project snapshots for sharing
//!
//! A snapshot is what a share token redeems to: a stripped copy of the
//! project taken at share-creation time. Member lists, owner ids, and
//! every other internal field stay behind; histories are capped at the
//! most recent [`HISTORY_LIMIT`] entries. Once built, a snapshot is never
//! updated, regardless of what happens to the source project.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use common::models::Project;

/// Maximum number of history entries carried into a snapshot
pub const HISTORY_LIMIT: usize = 30;

/// Read-only, field-limited copy of a project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectSnapshot {
    pub name: String,
    pub url: String,
    pub checked: HashMap<String, bool>,
    pub analyzer_results: Option<Value>,
    pub monitor_history: Vec<Value>,
    pub metrics_history: Vec<Value>,
    pub questionnaire: Option<Value>,
    /// When the snapshot itself was taken
    pub created_at: DateTime<Utc>,
}

impl ProjectSnapshot {
    /// Build a snapshot of the project as it is right now
    pub fn from_project(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            url: project.url.clone(),
            checked: project.checked.clone(),
            analyzer_results: project.analyzer_results.clone(),
            monitor_history: tail(&project.monitor_history),
            metrics_history: tail(&project.metrics_history),
            questionnaire: project.questionnaire.clone(),
            created_at: Utc::now(),
        }
    }
}

/// Most recent `HISTORY_LIMIT` entries, original order preserved
fn tail(history: &[Value]) -> Vec<Value> {
    let start = history.len().saturating_sub(HISTORY_LIMIT);
    history[start..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn test_long_histories_keep_only_the_most_recent_thirty() {
        let mut project = fixture();
        project.monitor_history = (0..50).map(|i| json!({"seq": i})).collect();

        let snapshot = ProjectSnapshot::from_project(&project);

        assert_eq!(snapshot.monitor_history.len(), HISTORY_LIMIT);
        // Last 30 of the original, in original order
        assert_eq!(snapshot.monitor_history[0], json!({"seq": 20}));
        assert_eq!(snapshot.monitor_history[29], json!({"seq": 49}));
    }

    #[test]
    fn test_short_histories_are_copied_unchanged() {
        let mut project = fixture();
        project.metrics_history = (0..5).map(|i| json!({"seq": i})).collect();

        let snapshot = ProjectSnapshot::from_project(&project);

        assert_eq!(snapshot.metrics_history.len(), 5);
        assert_eq!(snapshot.metrics_history[0], json!({"seq": 0}));
    }

    #[test]
    fn test_snapshot_keeps_checklist_state_and_name() {
        let mut project = fixture();
        project.checked.insert("item-1".to_string(), true);
        project.checked.insert("item-2".to_string(), false);

        let snapshot = ProjectSnapshot::from_project(&project);

        assert_eq!(snapshot.name, project.name);
        assert_eq!(snapshot.url, project.url);
        assert_eq!(snapshot.checked, project.checked);
    }

    #[test]
    fn test_snapshot_wire_form_exposes_no_membership_fields() {
        let snapshot = ProjectSnapshot::from_project(&fixture());

        let wire = serde_json::to_value(&snapshot).unwrap();
        let fields = wire.as_object().unwrap();
        assert!(!fields.contains_key("members"));
        assert!(!fields.contains_key("owner_id"));
        assert!(!fields.contains_key("id"));
    }

    #[test]
    fn test_snapshot_is_unaffected_by_later_project_mutation() {
        let mut project = fixture();
        project.checked.insert("item-1".to_string(), true);

        let snapshot = ProjectSnapshot::from_project(&project);
        project.checked.insert("item-2".to_string(), true);
        project.name = "Renamed".to_string();

        assert_eq!(snapshot.name, "Example");
        assert!(!snapshot.checked.contains_key("item-2"));
    }

    fn fixture() -> Project {
        Project {
            id: Uuid::new_v4(),
            owner_id: Some("alice".to_string()),
            name: "Example".to_string(),
            url: "https://example.com".to_string(),
            members: vec![],
            checked: HashMap::new(),
            analyzer_results: None,
            monitor_history: vec![],
            metrics_history: vec![],
            questionnaire: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}
