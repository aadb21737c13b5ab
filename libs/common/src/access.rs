//! Role resolution for (user, project) pairs
//!
//! This is the single decision point every service consults before
//! permitting a mutation. Resolution is a pure function and never fails:
//! malformed input degrades to the least-privileged role instead of
//! erroring.

use serde::Serialize;

use crate::models::{Project, UserIdentity};
use crate::roles::{Permission, Role};

/// Resolve the role a user holds on a project
///
/// Rules, first match wins. The order is load-bearing and must not be
/// changed:
///
/// 1. no user or no project: `viewer`
/// 2. legacy project (no owner recorded): `admin` for any signed-in user
/// 3. the owner: `admin`, even if a stale member entry disagrees
/// 4. listed member: that entry's role
/// 5. anyone else: `viewer`
pub fn resolve_role(user: Option<&UserIdentity>, project: Option<&Project>) -> Role {
    let (Some(user), Some(project)) = (user, project) else {
        return Role::Viewer;
    };

    if project.is_legacy() {
        return Role::Admin;
    }

    if project.owner_id.as_deref() == Some(user.uid.as_str()) {
        return Role::Admin;
    }

    project
        .member(&user.uid)
        .map(|m| m.role)
        .unwrap_or(Role::Viewer)
}

/// True iff the user is the recorded owner of the project
///
/// Unlike [`resolve_role`], legacy projects have no owner: a user who is
/// admin on a legacy project is still not its owner.
pub fn is_owner(user: Option<&UserIdentity>, project: Option<&Project>) -> bool {
    match (user, project) {
        (Some(user), Some(project)) => {
            !project.is_legacy() && project.owner_id.as_deref() == Some(user.uid.as_str())
        }
        _ => false,
    }
}

/// Resolved access of a user on a project, as consumed by action-gating
/// callers
#[derive(Debug, Clone, Serialize)]
pub struct AccessProfile {
    pub role: Role,
    pub is_owner: bool,
    pub is_admin: bool,
    pub is_viewer: bool,
    pub can_edit: bool,
    /// Wire names of every permission the role grants
    pub permissions: Vec<&'static str>,
}

impl AccessProfile {
    /// Resolve the full access profile for a (user, project) pair
    pub fn resolve(user: Option<&UserIdentity>, project: Option<&Project>) -> Self {
        let role = resolve_role(user, project);

        Self {
            role,
            is_owner: is_owner(user, project),
            is_admin: role == Role::Admin,
            is_viewer: role == Role::Viewer,
            can_edit: role.has_permission(Permission::ProjectEdit),
            permissions: role.permissions().iter().map(|p| p.as_str()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Member;
    use chrono::Utc;
    use std::collections::HashMap;
    use uuid::Uuid;

    #[test]
    fn test_missing_user_or_project_resolves_to_viewer() {
        let project = project(Some("alice"), vec![]);
        let user = UserIdentity::new("alice");

        assert_eq!(resolve_role(None, Some(&project)), Role::Viewer);
        assert_eq!(resolve_role(Some(&user), None), Role::Viewer);
        assert_eq!(resolve_role(None, None), Role::Viewer);
    }

    #[test]
    fn test_legacy_project_grants_admin_to_any_user() {
        let project = project(None, vec![]);
        let user = UserIdentity::new("anyone");

        assert_eq!(resolve_role(Some(&user), Some(&project)), Role::Admin);
        assert!(!is_owner(Some(&user), Some(&project)));
    }

    #[test]
    fn test_owner_is_admin_even_with_conflicting_member_entry() {
        let project = project(Some("alice"), vec![member("alice", Role::Viewer)]);
        let user = UserIdentity::new("alice");

        assert_eq!(resolve_role(Some(&user), Some(&project)), Role::Admin);
        assert!(is_owner(Some(&user), Some(&project)));
    }

    #[test]
    fn test_member_gets_stored_role_and_stranger_gets_viewer() {
        let project = project(Some("other"), vec![member("u1", Role::Editor)]);

        let u1 = UserIdentity::new("u1");
        assert_eq!(resolve_role(Some(&u1), Some(&project)), Role::Editor);

        let u2 = UserIdentity::new("u2");
        assert_eq!(resolve_role(Some(&u2), Some(&project)), Role::Viewer);
    }

    #[test]
    fn test_profile_for_editor_member() {
        let project = project(Some("other"), vec![member("bob", Role::Editor)]);
        let bob = UserIdentity::new("bob");

        let profile = AccessProfile::resolve(Some(&bob), Some(&project));
        assert_eq!(profile.role, Role::Editor);
        assert!(profile.can_edit);
        assert!(!profile.is_owner);
        assert!(!profile.is_admin);
        assert!(!profile.is_viewer);
        assert!(profile.permissions.contains(&"checklist:toggle"));
        assert!(!profile.permissions.contains(&"project:delete"));
    }

    #[test]
    fn test_profile_for_unauthenticated_caller() {
        let project = project(Some("alice"), vec![]);

        let profile = AccessProfile::resolve(None, Some(&project));
        assert_eq!(profile.role, Role::Viewer);
        assert!(profile.is_viewer);
        assert!(!profile.can_edit);
        assert_eq!(profile.permissions, vec!["activity:view"]);
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

    fn project(owner_id: Option<&str>, members: Vec<Member>) -> Project {
        Project {
            id: Uuid::new_v4(),
            owner_id: owner_id.map(str::to_string),
            name: "Example".to_string(),
            url: "https://example.com".to_string(),
            members,
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
