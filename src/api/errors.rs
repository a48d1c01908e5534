use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

use crate::services::ServiceError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request payload: {0}")]
    InvalidPayload(#[from] JsonRejection),
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| match &err.message {
                    Some(message) => message.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .collect();
        messages.sort();

        ApiError::Validation(messages.join("; "))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidPayload(rejection) => {
                tracing::debug!(error = %rejection, "request body rejected");
                (StatusCode::BAD_REQUEST, "Invalid request payload".to_string())
            }
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Service(err) => match err {
                ServiceError::TrainerNotFound
                | ServiceError::TraineeNotFound(_)
                | ServiceError::RequestNotFound(_)
                | ServiceError::ProgramNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                ServiceError::Forbidden(_) => (StatusCode::FORBIDDEN, err.to_string()),
                ServiceError::InvalidState(_) | ServiceError::Conflict(_) => {
                    (StatusCode::CONFLICT, err.to_string())
                }
                ServiceError::Repository(err) => {
                    tracing::error!(error = %err, "storage failure");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    )
                }
            },
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepositoryError;

    #[test]
    fn test_service_errors_map_to_status_codes() {
        let cases = [
            (ServiceError::TrainerNotFound, StatusCode::NOT_FOUND),
            (ServiceError::RequestNotFound(3), StatusCode::NOT_FOUND),
            (ServiceError::Forbidden("nope"), StatusCode::FORBIDDEN),
            (ServiceError::Conflict("taken".to_string()), StatusCode::CONFLICT),
            (
                ServiceError::Repository(RepositoryError::CorruptRecord("x".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), expected);
        }
    }
}
