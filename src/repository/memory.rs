use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{RepositoryError, TrainerRepository};
use crate::models::{
    ActiveDays, NewReport, NewSportActivity, NewTrainingProgram, ProgramRequest, Report,
    RequestStatus, SportActivity, Trainee, Trainer, TrainerProfileUpdate, TrainingProgram, User,
};

#[derive(Debug, Default)]
struct MemoryState {
    trainers: Vec<Trainer>,
    trainees: Vec<Trainee>,
    requests: Vec<ProgramRequest>,
    programs: Vec<TrainingProgram>,
    activities: Vec<SportActivity>,
    reports: Vec<Report>,
    next_id: i64,
}

impl MemoryState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Process-local `TrainerRepository`, used by tests and database-less runs
#[derive(Debug, Default)]
pub struct InMemoryTrainerRepository {
    state: RwLock<MemoryState>,
}

impl InMemoryTrainerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_trainer(&self, trainer: Trainer) {
        let mut state = self.state.write().await;
        state.next_id = state.next_id.max(trainer.id);
        state.trainers.push(trainer);
    }

    pub async fn add_trainee(&self, trainee: Trainee) {
        let mut state = self.state.write().await;
        state.next_id = state.next_id.max(trainee.id);
        state.trainees.push(trainee);
    }

    /// Link a trainee to a trainer; no-op when the trainer is unknown
    ///
    /// Links stay ordered by trainee id, matching the Postgres store.
    pub async fn assign_trainee(&self, trainer_id: i64, trainee_id: i64) {
        let mut state = self.state.write().await;
        if let Some(trainer) = state.trainers.iter_mut().find(|t| t.id == trainer_id) {
            if let Err(pos) = trainer.trainee_ids.binary_search(&trainee_id) {
                trainer.trainee_ids.insert(pos, trainee_id);
            }
        }
    }

    /// Open a pending request from a trainee to a trainer
    pub async fn open_request(&self, trainer_id: i64, trainee_id: i64, description: &str) -> i64 {
        let mut state = self.state.write().await;
        let trainee_name = state
            .trainees
            .iter()
            .find(|t| t.id == trainee_id)
            .map(|t| t.user.full_name())
            .unwrap_or_default();
        let id = state.next_id();

        state.requests.push(ProgramRequest {
            id,
            trainer_id,
            trainee_id,
            trainee_name,
            price: None,
            description: description.to_string(),
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        });

        id
    }

    pub async fn set_request_status(&self, request_id: i64, status: RequestStatus) {
        let mut state = self.state.write().await;
        if let Some(request) = state.requests.iter_mut().find(|r| r.id == request_id) {
            request.status = status;
        }
    }

    pub async fn reports(&self) -> Vec<Report> {
        self.state.read().await.reports.clone()
    }

    pub async fn activities(&self) -> Vec<SportActivity> {
        self.state.read().await.activities.clone()
    }

    pub async fn programs(&self) -> Vec<TrainingProgram> {
        self.state.read().await.programs.clone()
    }

    /// Populate a small demo data set: one trainer (user 1) with two trainees
    pub async fn seed_demo(&self) {
        self.add_trainer(Trainer {
            id: 1,
            user_id: 1,
            user: User {
                id: 1,
                first_name: "Maya".to_string(),
                last_name: "Okafor".to_string(),
                email: "maya.okafor@example.com".to_string(),
            },
            user_name: "coach_maya".to_string(),
            status: "available".to_string(),
            coach_experience: 7,
            contact: "+44 20 7946 0018".to_string(),
            language: "en".to_string(),
            country: "United Kingdom".to_string(),
            sports: vec!["running".to_string(), "triathlon".to_string()],
            achievements: "Ironman finisher".to_string(),
            education: "BSc Sport Science".to_string(),
            trainee_ids: vec![],
            active_days: ActiveDays {
                monday: true,
                wednesday: true,
                friday: true,
                ..ActiveDays::default()
            },
        })
        .await;

        for (id, first_name, last_name) in [(2, "Leo", "Brandt"), (3, "Sofia", "Reyes")] {
            self.add_trainee(Trainee {
                id,
                user_id: id,
                user: User {
                    id,
                    first_name: first_name.to_string(),
                    last_name: last_name.to_string(),
                    email: format!("{}@example.com", first_name.to_lowercase()),
                },
            })
            .await;
            self.assign_trainee(1, id).await;
        }

        self.open_request(1, 2, "Half marathon block, 12 weeks").await;
    }
}

#[async_trait]
impl TrainerRepository for InMemoryTrainerRepository {
    async fn find_trainer_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Option<Trainer>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.trainers.iter().find(|t| t.user_id == user_id).cloned())
    }

    async fn list_trainers(&self) -> Result<Vec<Trainer>, RepositoryError> {
        let state = self.state.read().await;
        let mut trainers = state.trainers.clone();
        trainers.sort_by_key(|t| t.id);
        Ok(trainers)
    }

    async fn update_trainer_profile(
        &self,
        trainer_id: i64,
        update: TrainerProfileUpdate,
    ) -> Result<Option<Trainer>, RepositoryError> {
        let mut state = self.state.write().await;

        if let Some(email) = &update.email {
            let Some(user_id) = state
                .trainers
                .iter()
                .find(|t| t.id == trainer_id)
                .map(|t| t.user_id)
            else {
                return Ok(None);
            };
            let taken = state
                .trainers
                .iter()
                .map(|t| &t.user)
                .chain(state.trainees.iter().map(|t| &t.user))
                .any(|user| user.id != user_id && &user.email == email);
            if taken {
                return Err(RepositoryError::Conflict(format!(
                    "email {email} is already in use"
                )));
            }
        }

        let Some(trainer) = state.trainers.iter_mut().find(|t| t.id == trainer_id) else {
            return Ok(None);
        };
        update.apply_to(trainer);

        Ok(Some(trainer.clone()))
    }

    async fn find_trainee(&self, trainee_id: i64) -> Result<Option<Trainee>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.trainees.iter().find(|t| t.id == trainee_id).cloned())
    }

    async fn list_requests_for_trainer(
        &self,
        trainer_id: i64,
    ) -> Result<Vec<ProgramRequest>, RepositoryError> {
        let state = self.state.read().await;
        let mut requests: Vec<ProgramRequest> = state
            .requests
            .iter()
            .filter(|r| r.trainer_id == trainer_id)
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(requests)
    }

    async fn find_request(
        &self,
        request_id: i64,
    ) -> Result<Option<ProgramRequest>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.requests.iter().find(|r| r.id == request_id).cloned())
    }

    async fn set_request_price(
        &self,
        request_id: i64,
        trainer_id: i64,
        price: i64,
        description: Option<String>,
    ) -> Result<Option<ProgramRequest>, RepositoryError> {
        let mut state = self.state.write().await;
        let Some(request) = state.requests.iter_mut().find(|r| {
            r.id == request_id && r.trainer_id == trainer_id && r.status.accepts_price()
        }) else {
            return Ok(None);
        };

        request.price = Some(price);
        if let Some(description) = description {
            request.description = description;
        }
        request.status = RequestStatus::Priced;

        Ok(Some(request.clone()))
    }

    async fn insert_program(
        &self,
        program: NewTrainingProgram,
    ) -> Result<TrainingProgram, RepositoryError> {
        let mut state = self.state.write().await;
        let program = TrainingProgram {
            id: state.next_id(),
            trainer_id: program.trainer_id,
            trainee_id: program.trainee_id,
            title: program.title,
            description: program.description,
            start_date: program.start_date,
            end_date: program.end_date,
            created_at: Utc::now(),
        };
        state.programs.push(program.clone());
        Ok(program)
    }

    async fn find_program(
        &self,
        program_id: i64,
    ) -> Result<Option<TrainingProgram>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.programs.iter().find(|p| p.id == program_id).cloned())
    }

    async fn insert_sport_activity(
        &self,
        activity: NewSportActivity,
    ) -> Result<SportActivity, RepositoryError> {
        let mut state = self.state.write().await;
        let activity = SportActivity {
            id: state.next_id(),
            program_id: activity.program_id,
            name: activity.name,
            day: activity.day,
            sets: activity.sets,
            repetitions: activity.repetitions,
            duration_minutes: activity.duration_minutes,
        };
        state.activities.push(activity.clone());
        Ok(activity)
    }

    async fn insert_report(&self, report: NewReport) -> Result<Report, RepositoryError> {
        let mut state = self.state.write().await;
        let report = Report {
            id: state.next_id(),
            user_id: report.user_id,
            description: report.description,
            created_at: Utc::now(),
        };
        state.reports.push(report.clone());
        Ok(report)
    }
}
