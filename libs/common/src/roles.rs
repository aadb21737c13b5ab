//! Role-based access control for dashboard projects
//!
//! A user holds exactly one [`Role`] per project, and every capability is
//! an explicit entry in that role's permission table. There is no numeric
//! privilege ordering: what a role may do is exactly what its table lists,
//! so adding a permission forces an explicit decision for every role.

use serde::{Deserialize, Serialize};

/// Role granted to a user within a project
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full project control, including deletion and member management
    Admin,
    /// Can work on the project but not delete it or manage its members
    Editor,
    /// Read-only access
    Viewer,
}

impl Role {
    /// Parse a role from its string representation (case-insensitive)
    ///
    /// Returns `None` for anything that is not one of the three known
    /// roles; callers decide whether to reject or degrade.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "editor" => Some(Self::Editor),
            "viewer" => Some(Self::Viewer),
            _ => None,
        }
    }

    /// Get the lowercase string representation of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Viewer => "viewer",
        }
    }

    /// Get the permission set for this role
    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            Self::Admin => &ADMIN_PERMISSIONS,
            Self::Editor => &EDITOR_PERMISSIONS,
            Self::Viewer => &VIEWER_PERMISSIONS,
        }
    }

    /// Check whether this role grants the given permission
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Viewer
    }
}

/// Fine-grained capability identifier checked against a role's permission set
///
/// The set is closed: no permissions are registered at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    ProjectEdit,
    ProjectDelete,
    ProjectManageMembers,
    ChecklistToggle,
    ChecklistAddNote,
    AnalyzerRun,
    ContentWrite,
    SchemaGenerate,
    MonitoringConfigure,
    SettingsEdit,
    ExportPdf,
    ExportEmail,
    CompetitorsManage,
    WebflowManage,
    ActivityView,
}

impl Permission {
    /// Get the wire name of the permission
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectEdit => "project:edit",
            Self::ProjectDelete => "project:delete",
            Self::ProjectManageMembers => "project:manage_members",
            Self::ChecklistToggle => "checklist:toggle",
            Self::ChecklistAddNote => "checklist:add_note",
            Self::AnalyzerRun => "analyzer:run",
            Self::ContentWrite => "content:write",
            Self::SchemaGenerate => "schema:generate",
            Self::MonitoringConfigure => "monitoring:configure",
            Self::SettingsEdit => "settings:edit",
            Self::ExportPdf => "export:pdf",
            Self::ExportEmail => "export:email",
            Self::CompetitorsManage => "competitors:manage",
            Self::WebflowManage => "webflow:manage",
            Self::ActivityView => "activity:view",
        }
    }

    /// Parse a permission from its wire name
    pub fn parse(s: &str) -> Option<Self> {
        ALL_PERMISSIONS.iter().copied().find(|p| p.as_str() == s)
    }
}

/// Every permission in the closed set
pub const ALL_PERMISSIONS: [Permission; 15] = [
    Permission::ProjectEdit,
    Permission::ProjectDelete,
    Permission::ProjectManageMembers,
    Permission::ChecklistToggle,
    Permission::ChecklistAddNote,
    Permission::AnalyzerRun,
    Permission::ContentWrite,
    Permission::SchemaGenerate,
    Permission::MonitoringConfigure,
    Permission::SettingsEdit,
    Permission::ExportPdf,
    Permission::ExportEmail,
    Permission::CompetitorsManage,
    Permission::WebflowManage,
    Permission::ActivityView,
];

// Admins hold the full set.
const ADMIN_PERMISSIONS: [Permission; 15] = ALL_PERMISSIONS;

// Editors hold everything except project deletion and member management.
// Listed explicitly so that a new permission requires a deliberate choice
// here rather than being inherited by subtraction.
const EDITOR_PERMISSIONS: [Permission; 13] = [
    Permission::ProjectEdit,
    Permission::ChecklistToggle,
    Permission::ChecklistAddNote,
    Permission::AnalyzerRun,
    Permission::ContentWrite,
    Permission::SchemaGenerate,
    Permission::MonitoringConfigure,
    Permission::SettingsEdit,
    Permission::ExportPdf,
    Permission::ExportEmail,
    Permission::CompetitorsManage,
    Permission::WebflowManage,
    Permission::ActivityView,
];

// Viewers may only read the activity feed.
const VIEWER_PERMISSIONS: [Permission; 1] = [Permission::ActivityView];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_holds_every_permission() {
        for p in ALL_PERMISSIONS {
            assert!(Role::Admin.has_permission(p), "admin missing {}", p.as_str());
        }
    }

    #[test]
    fn test_editor_excludes_exactly_delete_and_member_management() {
        for p in ALL_PERMISSIONS {
            let expected = !matches!(
                p,
                Permission::ProjectDelete | Permission::ProjectManageMembers
            );
            assert_eq!(
                Role::Editor.has_permission(p),
                expected,
                "editor mismatch on {}",
                p.as_str()
            );
        }
    }

    #[test]
    fn test_viewer_holds_only_activity_view() {
        for p in ALL_PERMISSIONS {
            assert_eq!(
                Role::Viewer.has_permission(p),
                p == Permission::ActivityView,
                "viewer mismatch on {}",
                p.as_str()
            );
        }
    }

    #[test]
    fn test_unknown_role_strings_do_not_parse() {
        assert_eq!(Role::parse("superadmin"), None);
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("owner"), None);
    }

    #[test]
    fn test_role_parse_round_trip() {
        for role in [Role::Admin, Role::Editor, Role::Viewer] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
    }

    #[test]
    fn test_permission_parse_round_trip() {
        for p in ALL_PERMISSIONS {
            assert_eq!(Permission::parse(p.as_str()), Some(p));
        }
        assert_eq!(Permission::parse("project:destroy"), None);
    }

    #[test]
    fn test_default_role_is_viewer() {
        assert_eq!(Role::default(), Role::Viewer);
    }
}
