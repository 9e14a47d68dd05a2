use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::access::models::RequestIdentity;
use crate::domain::user::models::ChangePasswordCommand;
use crate::inbound::http::router::AppState;

/// Change the caller's own password; the target id comes from the token.
pub async fn change_password(
    State(state): State<AppState>,
    Extension(identity): Extension<RequestIdentity>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<ApiSuccess<()>, ApiError> {
    let command = ChangePasswordCommand {
        old_password: body.old_password,
        new_password: body.new_password,
    };

    state
        .user_service
        .change_password(&identity.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|()| ApiSuccess::new(StatusCode::OK, ()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    old_password: String,
    new_password: String,
}
