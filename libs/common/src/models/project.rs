//! Project model and related functionality
//!
//! A project is the unit of collaboration: it carries the checklist state,
//! the analyzer and monitoring data, and the member list that the role
//! resolver consults. Projects are mutated only through the access
//! service's repository; this crate defines the shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use std::collections::HashMap;
use uuid::Uuid;

use crate::roles::Role;

/// Project member entry
///
/// Member lists are ordered; role lookups take the first entry matching a
/// uid. The stored role is validated on read: anything that is not a known
/// role deserializes as `viewer` rather than carrying an arbitrary string
/// into the permission tables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub uid: String,
    #[serde(deserialize_with = "role_or_viewer")]
    pub role: Role,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub added_at: DateTime<Utc>,
}

fn role_or_viewer<'de, D>(deserializer: D) -> Result<Role, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(Role::parse(&raw).unwrap_or(Role::Viewer))
}

/// Project entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    /// Owning user's uid. Projects created before ownership tracking have
    /// no owner; the resolver treats those as open to any signed-in user.
    pub owner_id: Option<String>,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub members: Vec<Member>,
    /// Checklist completion state keyed by checklist item id
    #[serde(default)]
    pub checked: HashMap<String, bool>,
    #[serde(default)]
    pub analyzer_results: Option<Value>,
    #[serde(default)]
    pub monitor_history: Vec<Value>,
    #[serde(default)]
    pub metrics_history: Vec<Value>,
    #[serde(default)]
    pub questionnaire: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FromRow<'_, PgRow> for Project {
    /// Map a database row to a project
    ///
    /// JSONB columns pass through serde, which is also where stored
    /// member roles are validated.
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        fn decode_json<T: serde::de::DeserializeOwned>(
            row: &PgRow,
            column: &str,
        ) -> Result<T, sqlx::Error> {
            serde_json::from_value(row.try_get::<Value, _>(column)?).map_err(|e| {
                sqlx::Error::ColumnDecode {
                    index: column.to_string(),
                    source: Box::new(e),
                }
            })
        }

        Ok(Project {
            id: row.try_get("id")?,
            owner_id: row.try_get("owner_id")?,
            name: row.try_get("name")?,
            url: row.try_get("url")?,
            members: decode_json(row, "members")?,
            checked: decode_json(row, "checked")?,
            analyzer_results: row.try_get("analyzer_results")?,
            monitor_history: decode_json(row, "monitor_history")?,
            metrics_history: decode_json(row, "metrics_history")?,
            questionnaire: row.try_get("questionnaire")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl Project {
    /// True when the project predates ownership tracking
    ///
    /// Legacy records may carry either no `owner_id` at all or an empty
    /// string left behind by old clients; both count.
    pub fn is_legacy(&self) -> bool {
        self.owner_id.as_deref().is_none_or(|id| id.is_empty())
    }

    /// First member entry matching `uid`, if any
    pub fn member(&self, uid: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.uid == uid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_stored_role_degrades_to_viewer() {
        let json = r#"{
            "uid": "u1",
            "role": "superadmin",
            "display_name": null,
            "email": null,
            "added_at": "2025-01-01T00:00:00Z"
        }"#;

        let member: Member = serde_json::from_str(json).unwrap();
        assert_eq!(member.role, Role::Viewer);
    }

    #[test]
    fn test_known_stored_role_is_kept() {
        let json = r#"{
            "uid": "u1",
            "role": "editor",
            "display_name": "U One",
            "email": "u1@example.com",
            "added_at": "2025-01-01T00:00:00Z"
        }"#;

        let member: Member = serde_json::from_str(json).unwrap();
        assert_eq!(member.role, Role::Editor);
    }

    #[test]
    fn test_empty_owner_id_counts_as_legacy() {
        let mut project = fixture();
        assert!(!project.is_legacy());

        project.owner_id = Some(String::new());
        assert!(project.is_legacy());

        project.owner_id = None;
        assert!(project.is_legacy());
    }

    #[test]
    fn test_member_lookup_takes_first_match() {
        let mut project = fixture();
        project.members = vec![
            member("u1", Role::Editor),
            member("u1", Role::Admin),
            member("u2", Role::Viewer),
        ];

        assert_eq!(project.member("u1").unwrap().role, Role::Editor);
        assert_eq!(project.member("u3"), None);
    }

    fn member(uid: &str, role: Role) -> Member {
        Member {
            uid: uid.to_string(),
            role,
            display_name: None,
            email: None,
            added_at: Utc::now(),
        }
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
