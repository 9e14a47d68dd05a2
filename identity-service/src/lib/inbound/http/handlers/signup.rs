use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::BearerTokenResponseData;
use crate::domain::user::models::SignupCommand;
use crate::inbound::http::router::AppState;

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<ApiSuccess<BearerTokenResponseData>, ApiError> {
    state
        .user_service
        .signup(body.into())
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, BearerTokenResponseData::new(token)))
}

/// HTTP request body for signup (raw JSON). Absent fields are validated by
/// the signup flow rather than rejected by deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    email: Option<String>,
    password: Option<String>,
    role: Option<String>,
}

impl From<SignupRequest> for SignupCommand {
    fn from(body: SignupRequest) -> Self {
        SignupCommand {
            email: body.email,
            password: body.password,
            role: body.role,
        }
    }
}
