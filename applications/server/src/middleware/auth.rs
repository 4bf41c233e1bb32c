/// Authentication middleware
use crate::{error::ServerError, services::AuthService};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tally_core::UserId;

/// Authenticated identity stored in request extensions
///
/// Handlers take this as an extractor and must scope every data access to
/// it; client-supplied identity fields are never trusted.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: String,
}

/// Middleware that validates the bearer token on protected routes
///
/// A missing or malformed Authorization header stops the request with 401; a
/// present but invalid or expired token stops it with 403.
pub async fn auth_middleware(
    State(auth_service): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(ServerError::Unauthorized)?;

    // Check Bearer prefix
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ServerError::Unauthorized)?;

    // Verify signature and expiry
    let claims = auth_service.verify_token(token).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        ServerError::Forbidden
    })?;

    // Insert the decoded identity into request extensions
    request.extensions_mut().insert(CurrentUser {
        id: UserId::new(claims.sub),
        username: claims.username,
    });

    Ok(next.run(request).await)
}

/// Implement FromRequestParts so CurrentUser can be used as an extractor
#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(ServerError::Unauthorized)
    }
}
