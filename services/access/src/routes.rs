//! Access service routes
//!
//! Every mutation resolves the caller's role first and answers 403 when
//! the required permission is missing; gating happens here, never in the
//! repository.

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::Utc;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use common::access::{AccessProfile, resolve_role};
use common::models::{Member, Project, UserIdentity};
use common::roles::Permission;

use crate::{
    error::AccessError,
    middleware::auth_middleware,
    models::{AddMemberRequest, ChecklistUpdateRequest, CreateProjectRequest, UpdateMemberRequest},
    state::AppState,
};

/// Create the router for the access service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/projects", post(create_project).get(list_projects))
        .route("/projects/:id", get(get_project).delete(delete_project))
        .route("/projects/:id/access", get(get_access))
        .route("/projects/:id/members", post(add_member))
        .route(
            "/projects/:id/members/:uid",
            put(update_member).delete(remove_member),
        )
        .route("/projects/:id/checklist", put(update_checklist))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "access-service"
    }))
}

/// Create a new project owned by the caller
pub async fn create_project(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<impl IntoResponse, AccessError> {
    if payload.name.trim().is_empty() {
        return Err(AccessError::BadRequest("Project name is required".into()));
    }

    let project = state
        .project_repository
        .create(&user, &payload.name, &payload.url)
        .await
        .map_err(|e| {
            error!("Failed to create project: {}", e);
            AccessError::InternalServerError
        })?;

    Ok((StatusCode::CREATED, Json(project)))
}

/// List the caller's projects
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> Result<impl IntoResponse, AccessError> {
    let projects = state
        .project_repository
        .list_for_user(&user.uid)
        .await
        .map_err(|e| {
            error!("Failed to list projects: {}", e);
            AccessError::InternalServerError
        })?;

    Ok(Json(projects))
}

/// Get a project by ID
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AccessError> {
    let project = load_project(&state, id).await?;
    Ok(Json(project))
}

/// Resolve the caller's access profile on a project
///
/// Resolution is total: an unknown project id yields the viewer profile
/// rather than an error, matching how the resolver treats a missing
/// project everywhere else.
pub async fn get_access(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AccessError> {
    let project = state.project_repository.find_by_id(id).await.map_err(|e| {
        error!("Failed to load project {}: {}", id, e);
        AccessError::InternalServerError
    })?;

    let profile = AccessProfile::resolve(Some(&user), project.as_ref());
    Ok(Json(profile))
}

/// Delete a project
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AccessError> {
    let project = load_project(&state, id).await?;
    require_permission(&user, &project, Permission::ProjectDelete)?;

    state.project_repository.delete(id).await.map_err(|e| {
        error!("Failed to delete project {}: {}", id, e);
        AccessError::InternalServerError
    })?;

    Ok(Json(json!({"message": "Project deleted"})))
}

/// Add a member to a project
pub async fn add_member(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddMemberRequest>,
) -> Result<impl IntoResponse, AccessError> {
    let mut project = load_project(&state, id).await?;
    require_permission(&user, &project, Permission::ProjectManageMembers)?;

    if project.member(&payload.uid).is_some() {
        return Err(AccessError::Conflict(format!(
            "User {} is already a member",
            payload.uid
        )));
    }

    project.members.push(Member {
        uid: payload.uid,
        role: payload.role,
        display_name: payload.display_name,
        email: payload.email,
        added_at: Utc::now(),
    });

    save_members(&state, &project).await?;

    Ok((StatusCode::CREATED, Json(project)))
}

/// Change a member's role
pub async fn update_member(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path((id, uid)): Path<(Uuid, String)>,
    Json(payload): Json<UpdateMemberRequest>,
) -> Result<impl IntoResponse, AccessError> {
    let mut project = load_project(&state, id).await?;
    require_permission(&user, &project, Permission::ProjectManageMembers)?;

    let member = project
        .members
        .iter_mut()
        .find(|m| m.uid == uid)
        .ok_or(AccessError::NotFound)?;
    member.role = payload.role;

    save_members(&state, &project).await?;

    Ok(Json(project))
}

/// Remove a member from a project
pub async fn remove_member(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path((id, uid)): Path<(Uuid, String)>,
) -> Result<impl IntoResponse, AccessError> {
    let mut project = load_project(&state, id).await?;
    require_permission(&user, &project, Permission::ProjectManageMembers)?;

    let before = project.members.len();
    project.members.retain(|m| m.uid != uid);
    if project.members.len() == before {
        return Err(AccessError::NotFound);
    }

    save_members(&state, &project).await?;

    Ok(Json(project))
}

/// Toggle a checklist item
pub async fn update_checklist(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ChecklistUpdateRequest>,
) -> Result<impl IntoResponse, AccessError> {
    let project = load_project(&state, id).await?;
    require_permission(&user, &project, Permission::ChecklistToggle)?;

    state
        .project_repository
        .set_checklist_item(id, &payload.item_id, payload.checked)
        .await
        .map_err(|e| {
            error!("Failed to update checklist for project {}: {}", id, e);
            AccessError::InternalServerError
        })?;

    Ok(Json(json!({
        "item_id": payload.item_id,
        "checked": payload.checked
    })))
}

/// Load a project or answer 404
async fn load_project(state: &AppState, id: Uuid) -> Result<Project, AccessError> {
    state
        .project_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to load project {}: {}", id, e);
            AccessError::InternalServerError
        })?
        .ok_or(AccessError::NotFound)
}

/// Answer 403 unless the caller's resolved role grants the permission
fn require_permission(
    user: &UserIdentity,
    project: &Project,
    permission: Permission,
) -> Result<(), AccessError> {
    let role = resolve_role(Some(user), Some(project));
    if role.has_permission(permission) {
        Ok(())
    } else {
        Err(AccessError::Forbidden)
    }
}

/// Persist the project's member list
async fn save_members(state: &AppState, project: &Project) -> Result<(), AccessError> {
    state
        .project_repository
        .update_members(project.id, &project.members)
        .await
        .map_err(|e| {
            error!("Failed to update members for project {}: {}", project.id, e);
            AccessError::InternalServerError
        })?;
    Ok(())
}
