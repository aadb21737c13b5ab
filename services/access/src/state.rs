//! Application state shared across handlers

use common::auth::JwtVerifier;
use sqlx::PgPool;

use crate::repositories::ProjectRepository;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub project_repository: ProjectRepository,
    pub jwt_verifier: JwtVerifier,
}
