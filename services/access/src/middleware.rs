//! Middleware for JWT token validation and authentication
//!
//! On success the caller's [`UserIdentity`] is inserted into the request
//! extensions for handlers to read.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use tracing::error;

use crate::{error::AccessError, state::AppState};

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AccessError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(AccessError::Unauthorized)?;

    let identity = state.jwt_verifier.verify(bearer.token()).map_err(|e| {
        error!("Failed to validate token: {}", e);
        AccessError::Unauthorized
    })?;

    // Make the identity available to handlers
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
