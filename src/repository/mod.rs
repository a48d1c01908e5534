// Storage seam for the trainer service

pub mod memory;
pub mod postgres;

pub use memory::InMemoryTrainerRepository;
pub use postgres::PgTrainerRepository;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    NewReport, NewSportActivity, NewTrainingProgram, ProgramRequest, Report, SportActivity,
    Trainee, Trainer, TrainerProfileUpdate, TrainingProgram,
};

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Unique constraint violated: {0}")]
    Conflict(String),
    #[error("Corrupt record: {0}")]
    CorruptRecord(String),
}

/// Persistence operations backing the trainer endpoints
///
/// Lookups return `Ok(None)` for missing rows; deciding whether that is an
/// error belongs to the service layer.
#[async_trait]
pub trait TrainerRepository: Send + Sync {
    async fn find_trainer_by_user_id(&self, user_id: i64)
        -> Result<Option<Trainer>, RepositoryError>;

    async fn list_trainers(&self) -> Result<Vec<Trainer>, RepositoryError>;

    async fn update_trainer_profile(
        &self,
        trainer_id: i64,
        update: TrainerProfileUpdate,
    ) -> Result<Option<Trainer>, RepositoryError>;

    async fn find_trainee(&self, trainee_id: i64) -> Result<Option<Trainee>, RepositoryError>;

    async fn list_requests_for_trainer(
        &self,
        trainer_id: i64,
    ) -> Result<Vec<ProgramRequest>, RepositoryError>;

    async fn find_request(&self, request_id: i64)
        -> Result<Option<ProgramRequest>, RepositoryError>;

    /// Store a price on a request and mark it as priced
    ///
    /// Only writes when the request belongs to `trainer_id` and is still
    /// pending or priced; otherwise returns `Ok(None)` and leaves it untouched.
    async fn set_request_price(
        &self,
        request_id: i64,
        trainer_id: i64,
        price: i64,
        description: Option<String>,
    ) -> Result<Option<ProgramRequest>, RepositoryError>;

    async fn insert_program(
        &self,
        program: NewTrainingProgram,
    ) -> Result<TrainingProgram, RepositoryError>;

    async fn find_program(&self, program_id: i64)
        -> Result<Option<TrainingProgram>, RepositoryError>;

    async fn insert_sport_activity(
        &self,
        activity: NewSportActivity,
    ) -> Result<SportActivity, RepositoryError>;

    async fn insert_report(&self, report: NewReport) -> Result<Report, RepositoryError>;
}
