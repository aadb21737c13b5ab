//! Middleware for JWT token validation and authentication
//!
//! Only the share-management routes sit behind this; the portal
//! redemption route is deliberately unauthenticated, since the share
//! token itself is the credential there.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use tracing::error;

use crate::{error::ShareError, state::AppState};

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ShareError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(ShareError::Unauthorized)?;

    let identity = state.jwt_verifier.verify(bearer.token()).map_err(|e| {
        error!("Failed to validate token: {}", e);
        ShareError::Unauthorized
    })?;

    // Make the identity available to handlers
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
