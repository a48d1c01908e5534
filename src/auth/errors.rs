use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing authorization header")]
    MissingAuthHeader,
    #[error("Invalid authorization header format")]
    InvalidAuthHeaderFormat,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingAuthHeader | AuthError::InvalidAuthHeaderFormat => {
                StatusCode::BAD_REQUEST
            }
            AuthError::InvalidToken | AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
            AuthError::Jwt(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message exposed to clients; the `Display` form is kept for logs
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader | AuthError::InvalidAuthHeaderFormat => {
                "Authorization header missing or invalid"
            }
            AuthError::InvalidToken | AuthError::TokenExpired => "Invalid JWT token",
            AuthError::Jwt(_) => "Internal server error",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "request rejected by auth guard");

        let body = Json(json!({
            "message": self.public_message(),
        }));

        (self.status_code(), body).into_response()
    }
}
