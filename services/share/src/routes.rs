//! Share service routes
//!
//! Two surfaces share one router: the authenticated management routes
//! (mint, revoke, list) and the public portal route that redeems a token
//! for its snapshot.

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use common::access::resolve_role;
use common::models::{Project, UserIdentity};
use common::roles::Permission;

use crate::{error::ShareError, middleware::auth_middleware, state::AppState, token};

/// Request for minting a share link
#[derive(Deserialize)]
pub struct CreateShareRequest {
    pub project_id: Uuid,
}

/// Create the router for the share service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/shares", post(create_share))
        .route("/shares/:token", delete(revoke_share))
        .route("/projects/:id/shares", get(list_project_shares))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/shared/:token", get(redeem_share))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "share-service"
    }))
}

/// Mint a share link for a project
pub async fn create_share(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<CreateShareRequest>,
) -> Result<impl IntoResponse, ShareError> {
    let project = load_project(&state, payload.project_id)
        .await?
        .ok_or(ShareError::NotFound)?;
    require_permission(&user, &project, Permission::ProjectEdit)?;

    let created = state.share_store.create_share_link(&project, &user.uid).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Redeem a share token for its snapshot (public portal surface)
pub async fn redeem_share(
    State(state): State<AppState>,
    Path(share_token): Path<String>,
) -> Result<impl IntoResponse, ShareError> {
    if !token::is_well_formed(&share_token) {
        return Err(ShareError::BadRequest("Invalid share token".to_string()));
    }

    let record = state.share_store.fetch_shared_project(&share_token).await?;

    Ok(Json(record))
}

/// Revoke a share link
pub async fn revoke_share(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(share_token): Path<String>,
) -> Result<impl IntoResponse, ShareError> {
    if !token::is_well_formed(&share_token) {
        return Err(ShareError::BadRequest("Invalid share token".to_string()));
    }

    let record = state.share_store.fetch_shared_project(&share_token).await?;

    // Editors of the project may revoke; when the project itself is gone,
    // only the user who created the share may clean it up.
    match load_project(&state, record.project_id).await? {
        Some(project) => require_permission(&user, &project, Permission::ProjectEdit)?,
        None => {
            if record.user_id != user.uid {
                return Err(ShareError::Forbidden);
            }
        }
    }

    state.share_store.revoke_share_link(&share_token).await?;

    Ok(Json(json!({"message": "Share link revoked"})))
}

/// List the locally-stored share links of a project
pub async fn list_project_shares(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ShareError> {
    let project = load_project(&state, id).await?.ok_or(ShareError::NotFound)?;
    require_permission(&user, &project, Permission::ProjectEdit)?;

    let shares = state.share_store.project_shares(id).await;
    Ok(Json(shares))
}

/// Load a project, mapping repository failures to 500
async fn load_project(state: &AppState, id: Uuid) -> Result<Option<Project>, ShareError> {
    state.project_reader.find_by_id(id).await.map_err(|e| {
        error!("Failed to load project {}: {}", id, e);
        ShareError::InternalServerError
    })
}

/// Answer 403 unless the caller's resolved role grants the permission
fn require_permission(
    user: &UserIdentity,
    project: &Project,
    permission: Permission,
) -> Result<(), ShareError> {
    let role = resolve_role(Some(user), Some(project));
    if role.has_permission(permission) {
        Ok(())
    } else {
        Err(ShareError::Forbidden)
    }
}
