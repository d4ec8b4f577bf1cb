use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::request_context;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::LoginCommand;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let command = body.try_into_command()?;
    let ctx = request_context(&state, &headers);

    state
        .auth_service
        .login(&ctx, command)
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, LoginResponseData { token }))
}

/// HTTP request body for logging in (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    app_id: i32,
}

#[derive(Debug, Clone, Error)]
enum ParseLoginRequestError {
    #[error("email is empty")]
    EmptyEmail,

    #[error("password is empty")]
    EmptyPassword,

    #[error("app_id is required")]
    MissingAppId,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, ParseLoginRequestError> {
        if self.email.is_empty() {
            return Err(ParseLoginRequestError::EmptyEmail);
        }
        if self.password.is_empty() {
            return Err(ParseLoginRequestError::EmptyPassword);
        }
        if self.app_id == 0 {
            return Err(ParseLoginRequestError::MissingAppId);
        }

        Ok(LoginCommand::new(
            self.email,
            self.password,
            AppId(self.app_id),
        ))
    }
}

impl From<ParseLoginRequestError> for ApiError {
    fn from(err: ParseLoginRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
}
