//! Identity resolution middleware

use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use practice_core::OwnerKey;

use crate::error::{ApiError, Result};

/// Resolved request identity stored in request extensions
#[derive(Clone, Debug)]
pub struct Identity(pub OwnerKey);

/// Identity middleware - maps upstream identity headers to an owner key.
///
/// The identity provider in front of this service resolves each request to
/// either an authenticated user (`x-user-id`) or an anonymous device
/// session (`x-session-id`); the authenticated identity wins when both are
/// present. Requests carrying neither are rejected.
pub async fn identity_middleware(mut request: Request<Body>, next: Next) -> Result<Response> {
    let headers = request.headers();

    let user_id = headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_owned);
    let session_id = headers
        .get("x-session-id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_owned);

    let owner = if let Some(id) = user_id {
        OwnerKey::User(id)
    } else if let Some(id) = session_id {
        OwnerKey::Session(id)
    } else {
        return Err(ApiError::Unauthorized(
            "Must be authenticated or provide a session id".to_string(),
        ));
    };

    request.extensions_mut().insert(Identity(owner));

    Ok(next.run(request).await)
}
