use std::sync::Arc;
use std::time::Duration;

use auth::Role;
use auth::TokenService;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::change_password::change_password;
use super::handlers::change_user_role::change_user_role;
use super::handlers::get_user::get_user;
use super::handlers::signin::signin;
use super::handlers::signup::signup;
use super::middleware::audit_access;
use super::middleware::authenticate as auth_middleware;
use super::middleware::require_role;
use crate::access::gate::AccessGate;
use crate::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub token_service: Arc<TokenService>,
}

/// Capability tag for a group of privileged routes.
///
/// Applying it wraps every route in the group with the role check (deny by
/// default) and, inside that, the audit gate. Handlers never check roles.
#[derive(Debug, Clone, Copy)]
pub struct Privileged {
    required: Role,
}

impl Privileged {
    pub fn new(required: Role) -> Self {
        Self { required }
    }

    pub fn apply(self, routes: Router<AppState>, gate: Arc<AccessGate>) -> Router<AppState> {
        routes
            .route_layer(middleware::from_fn_with_state(gate, audit_access))
            .route_layer(middleware::from_fn_with_state(self.required, require_role))
    }
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    token_service: Arc<TokenService>,
    access_gate: Arc<AccessGate>,
) -> Router {
    let state = AppState {
        user_service,
        token_service,
    };

    let public_routes = Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/signin", post(signin));

    let user_routes = Router::new()
        .route("/users/:user_id", get(get_user))
        .route("/users", put(change_password));

    let admin_routes = Privileged::new(Role::Admin).apply(
        Router::new().route("/admin/users/:user_id", patch(change_user_role)),
        access_gate,
    );

    let protected_routes = user_routes
        .merge(admin_routes)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
