use thiserror::Error;

use crate::repository::RepositoryError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Trainer not found")]
    TrainerNotFound,
    #[error("Trainee {0} not found")]
    TraineeNotFound(i64),
    #[error("Request {0} not found")]
    RequestNotFound(i64),
    #[error("Training program {0} not found")]
    ProgramNotFound(i64),
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("{0}")]
    InvalidState(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Storage error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(message) => ServiceError::Conflict(message),
            other => ServiceError::Repository(other),
        }
    }
}
