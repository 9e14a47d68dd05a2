use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::BearerTokenResponseData;
use crate::domain::user::models::SigninCommand;
use crate::inbound::http::router::AppState;

pub async fn signin(
    State(state): State<AppState>,
    Json(body): Json<SigninRequest>,
) -> Result<ApiSuccess<BearerTokenResponseData>, ApiError> {
    let command = SigninCommand {
        email: body.email,
        password: body.password,
    };

    state
        .user_service
        .signin(command)
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, BearerTokenResponseData::new(token)))
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SigninRequest {
    email: Option<String>,
    password: Option<String>,
}
