//! Application state shared across handlers

use common::auth::JwtVerifier;

use crate::projects::ProjectReader;
use crate::store::ShareStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub share_store: ShareStore,
    pub project_reader: ProjectReader,
    pub jwt_verifier: JwtVerifier,
}
