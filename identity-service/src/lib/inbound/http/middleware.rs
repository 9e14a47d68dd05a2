use std::sync::Arc;

use auth::Role;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use http::header::AUTHORIZATION;
use uuid::Uuid;

use super::handlers::ApiError;
use crate::access::gate::AccessGate;
use crate::access::models::RequestContext;
use crate::access::models::RequestIdentity;
use crate::inbound::http::router::AppState;

/// Middleware that validates bearer tokens and attaches a [`RequestIdentity`]
/// to the request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let claims = state.token_service.verify(token).map_err(|e| {
        let correlation_id = Uuid::new_v4();
        tracing::warn!(
            %correlation_id,
            path = %req.uri().path(),
            error = %e,
            "JWT validation failed"
        );
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(RequestIdentity::from(claims));

    Ok(next.run(req).await)
}

/// Middleware that rejects callers whose role does not satisfy `required`.
///
/// Denies when no identity is attached.
pub async fn require_role(
    State(required): State<Role>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = req.extensions().get::<RequestIdentity>();

    AccessGate::authorize(identity, required).map_err(|e| {
        tracing::warn!(
            path = %req.uri().path(),
            user_id = ?identity.map(|i| i.user_id.0),
            email = ?identity.map(|i| i.email.as_str()),
            role = ?identity.map(|i| i.role),
            required = %required,
            "Privileged request rejected"
        );
        ApiError::from(e)
    })?;

    Ok(next.run(req).await)
}

/// Middleware that records an access log entry around the wrapped handler.
pub async fn audit_access(
    State(gate): State<Arc<AccessGate>>,
    req: Request,
    next: Next,
) -> Response {
    let context = RequestContext {
        path: req.uri().path().to_string(),
        identity: req.extensions().get::<RequestIdentity>().cloned(),
    };

    gate.observe(Some(context), next.run(req)).await
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )
    })
}
