use std::str::FromStr;

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
use crate::domain::auth::models::RegisterCommand;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let command = body.try_into_command()?;
    let ctx = request_context(&state, &headers);

    state
        .auth_service
        .register(&ctx, command)
        .await
        .map_err(ApiError::from)
        .map(|user_id| {
            ApiSuccess::new(
                StatusCode::CREATED,
                RegisterResponseData {
                    user_id: user_id.0,
                },
            )
        })
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("email is empty")]
    EmptyEmail,

    #[error("password is empty")]
    EmptyPassword,

    #[error("invalid email: {0}")]
    InvalidEmail(String),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        if self.email.is_empty() {
            return Err(ParseRegisterRequestError::EmptyEmail);
        }
        if self.password.is_empty() {
            return Err(ParseRegisterRequestError::EmptyPassword);
        }
        email_address::EmailAddress::from_str(&self.email)
            .map_err(|e| ParseRegisterRequestError::InvalidEmail(e.to_string()))?;

        Ok(RegisterCommand::new(self.email, self.password))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        match err {
            ParseRegisterRequestError::InvalidEmail(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            _ => ApiError::BadRequest(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub user_id: i64,
}
