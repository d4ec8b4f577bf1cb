use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Serialize;

use super::request_context;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::models::UserId;
use crate::inbound::http::router::AppState;

pub async fn is_admin(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i64>,
) -> Result<ApiSuccess<IsAdminResponseData>, ApiError> {
    if user_id <= 0 {
        return Err(ApiError::BadRequest("user_id is required".to_string()));
    }
    let ctx = request_context(&state, &headers);

    state
        .auth_service
        .is_admin(&ctx, UserId(user_id))
        .await
        .map_err(ApiError::from)
        .map(|is_admin| ApiSuccess::new(StatusCode::OK, IsAdminResponseData { is_admin }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IsAdminResponseData {
    pub is_admin: bool,
}
