use auth::Role;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::ChangeRoleCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Administrative role change. Registered only behind `Privileged(Admin)`.
pub async fn change_user_role(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(body): Json<ChangeUserRoleRequest>,
) -> Result<ApiSuccess<ChangeUserRoleResponseData>, ApiError> {
    let user_id = UserId::from_string(&user_id).map_err(UserError::from)?;

    state
        .user_service
        .change_user_role(&user_id, ChangeRoleCommand { role: body.role })
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangeUserRoleRequest {
    role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeUserRoleResponseData {
    pub id: i64,
    pub email: String,
    pub role: Role,
}

impl From<&User> for ChangeUserRoleResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            email: user.email.as_str().to_string(),
            role: user.role,
        }
    }
}
