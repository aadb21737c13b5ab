//! Access service models for request payloads
//!
//! Unlike stored member entries (where unknown roles degrade to viewer),
//! request payloads are strict: a request naming an unknown role is
//! rejected at deserialization.

use common::roles::Role;
use serde::Deserialize;

/// Request for project creation
#[derive(Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub url: String,
}

/// Request for adding a project member
#[derive(Deserialize)]
pub struct AddMemberRequest {
    pub uid: String,
    pub role: Role,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

/// Request for changing a member's role
#[derive(Deserialize)]
pub struct UpdateMemberRequest {
    pub role: Role,
}

/// Request for toggling a checklist item
#[derive(Deserialize)]
pub struct ChecklistUpdateRequest {
    pub item_id: String,
    pub checked: bool,
}
