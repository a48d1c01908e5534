use std::sync::Arc;

use crate::models::{
    NewReport, NewSportActivity, NewTrainingProgram, ProgramRequest, Report, SportActivity,
    Trainee, Trainer, TrainerProfileUpdate, TrainingProgram,
};
use crate::repository::TrainerRepository;
use crate::services::ServiceError;

/// Trainer-facing business operations on top of a `TrainerRepository`
#[derive(Clone)]
pub struct TrainerService {
    repo: Arc<dyn TrainerRepository>,
}

impl std::fmt::Debug for TrainerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrainerService").finish_non_exhaustive()
    }
}

impl TrainerService {
    pub fn new(repo: Arc<dyn TrainerRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_trainer_by_user_id(&self, user_id: i64) -> Result<Trainer, ServiceError> {
        self.repo
            .find_trainer_by_user_id(user_id)
            .await?
            .ok_or(ServiceError::TrainerNotFound)
    }

    pub async fn edit_trainer_profile(
        &self,
        trainer_id: i64,
        update: TrainerProfileUpdate,
    ) -> Result<Trainer, ServiceError> {
        let trainer = self
            .repo
            .update_trainer_profile(trainer_id, update)
            .await?
            .ok_or(ServiceError::TrainerNotFound)?;

        tracing::info!(trainer_id, "trainer profile updated");
        Ok(trainer)
    }

    pub async fn get_trainee_by_id(&self, trainee_id: i64) -> Result<Trainee, ServiceError> {
        self.repo
            .find_trainee(trainee_id)
            .await?
            .ok_or(ServiceError::TraineeNotFound(trainee_id))
    }

    /// Load every trainee linked to `trainer`, ordered by trainee id
    ///
    /// A dangling link fails the whole call.
    pub async fn get_trainees(&self, trainer: &Trainer) -> Result<Vec<Trainee>, ServiceError> {
        let mut trainees = Vec::with_capacity(trainer.trainee_ids.len());
        for &trainee_id in &trainer.trainee_ids {
            trainees.push(self.get_trainee_by_id(trainee_id).await?);
        }
        Ok(trainees)
    }

    pub async fn get_requests(&self, trainer: &Trainer) -> Result<Vec<ProgramRequest>, ServiceError> {
        Ok(self.repo.list_requests_for_trainer(trainer.id).await?)
    }

    pub async fn set_price(
        &self,
        trainer: &Trainer,
        request_id: i64,
        price: i64,
        description: Option<String>,
    ) -> Result<ProgramRequest, ServiceError> {
        let request = self
            .repo
            .find_request(request_id)
            .await?
            .ok_or(ServiceError::RequestNotFound(request_id))?;

        if request.trainer_id != trainer.id {
            return Err(ServiceError::Forbidden("Request does not belong to this trainer"));
        }
        if !request.status.accepts_price() {
            return Err(ServiceError::InvalidState(format!(
                "Request {} is already {}",
                request_id,
                request.status.as_str()
            )));
        }

        // The request may have been answered since it was read.
        let updated = self
            .repo
            .set_request_price(request_id, trainer.id, price, description)
            .await?
            .ok_or_else(|| {
                ServiceError::InvalidState(format!("Request {request_id} can no longer be priced"))
            })?;

        tracing::info!(trainer_id = trainer.id, request_id, price, "request priced");
        Ok(updated)
    }

    pub async fn create_training_program(
        &self,
        trainer: &Trainer,
        program: NewTrainingProgram,
    ) -> Result<TrainingProgram, ServiceError> {
        if !trainer.trainee_ids.contains(&program.trainee_id) {
            return Err(ServiceError::Forbidden("Trainee is not assigned to this trainer"));
        }

        let program = self
            .repo
            .insert_program(NewTrainingProgram {
                trainer_id: trainer.id,
                ..program
            })
            .await?;

        tracing::info!(trainer_id = trainer.id, program_id = program.id, "training program created");
        Ok(program)
    }

    pub async fn add_sport_activity(
        &self,
        trainer: &Trainer,
        activity: NewSportActivity,
    ) -> Result<SportActivity, ServiceError> {
        let program = self
            .repo
            .find_program(activity.program_id)
            .await?
            .ok_or(ServiceError::ProgramNotFound(activity.program_id))?;

        if program.trainer_id != trainer.id {
            return Err(ServiceError::Forbidden("Program does not belong to this trainer"));
        }

        Ok(self.repo.insert_sport_activity(activity).await?)
    }

    pub async fn get_all_trainers(&self) -> Result<Vec<Trainer>, ServiceError> {
        Ok(self.repo.list_trainers().await?)
    }

    pub async fn add_report(&self, report: NewReport) -> Result<Report, ServiceError> {
        let report = self.repo.insert_report(report).await?;
        tracing::info!(user_id = report.user_id, report_id = report.id, "report filed");
        Ok(report)
    }
}
