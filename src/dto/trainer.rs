use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{ActiveDays, Trainee, Trainer, TrainerProfileUpdate};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainerProfileCard {
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub status: String,
    pub coach_experience: i32,
    pub contact: String,
    pub language: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainerResponse {
    pub profile_card: TrainerProfileCard,
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub sports: Vec<String>,
    pub achievements: String,
    pub education: String,
}

impl From<&Trainer> for TrainerResponse {
    fn from(trainer: &Trainer) -> Self {
        Self {
            profile_card: TrainerProfileCard {
                user_name: trainer.user_name.clone(),
                first_name: trainer.user.first_name.clone(),
                last_name: trainer.user.last_name.clone(),
                email: trainer.user.email.clone(),
                status: trainer.status.clone(),
                coach_experience: trainer.coach_experience,
                contact: trainer.contact.clone(),
                language: trainer.language.clone(),
                country: trainer.country.clone(),
            },
            id: trainer.user.id,
            first_name: trainer.user.first_name.clone(),
            last_name: trainer.user.last_name.clone(),
            sports: trainer.sports.clone(),
            achievements: trainer.achievements.clone(),
            education: trainer.education.clone(),
        }
    }
}

/// Profile edit payload; omitted fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TrainerEdit {
    #[validate(length(min = 1, max = 64, message = "first_name must be 1-64 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 64, message = "last_name must be 1-64 characters"))]
    pub last_name: Option<String>,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 3, max = 32, message = "user_name must be 3-32 characters"))]
    pub user_name: Option<String>,
    #[validate(length(max = 64, message = "status must be at most 64 characters"))]
    pub status: Option<String>,
    #[validate(range(min = 0, max = 80, message = "coach_experience must be between 0 and 80 years"))]
    pub coach_experience: Option<i32>,
    #[validate(length(max = 128, message = "contact must be at most 128 characters"))]
    pub contact: Option<String>,
    #[validate(length(max = 64, message = "language must be at most 64 characters"))]
    pub language: Option<String>,
    #[validate(length(max = 64, message = "country must be at most 64 characters"))]
    pub country: Option<String>,
    #[validate(length(max = 20, message = "at most 20 sports may be listed"))]
    pub sports: Option<Vec<String>>,
    #[validate(length(max = 2000, message = "achievements must be at most 2000 characters"))]
    pub achievements: Option<String>,
    #[validate(length(max = 2000, message = "education must be at most 2000 characters"))]
    pub education: Option<String>,
    pub active_days: Option<WeekPlan>,
}

impl From<TrainerEdit> for TrainerProfileUpdate {
    fn from(edit: TrainerEdit) -> Self {
        Self {
            first_name: edit.first_name,
            last_name: edit.last_name,
            email: edit.email,
            user_name: edit.user_name,
            status: edit.status,
            coach_experience: edit.coach_experience,
            contact: edit.contact,
            language: edit.language,
            country: edit.country,
            sports: edit.sports,
            achievements: edit.achievements,
            education: edit.education,
            active_days: edit.active_days.map(ActiveDays::from),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TraineeInTrainerPage {
    pub name: String,
}

impl From<&Trainee> for TraineeInTrainerPage {
    fn from(trainee: &Trainee) -> Self {
        Self {
            name: trainee.user.full_name(),
        }
    }
}

/// Days of the week the trainer is active
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WeekPlan {
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
}

impl From<ActiveDays> for WeekPlan {
    fn from(days: ActiveDays) -> Self {
        Self {
            monday: days.monday,
            tuesday: days.tuesday,
            wednesday: days.wednesday,
            thursday: days.thursday,
            friday: days.friday,
            saturday: days.saturday,
            sunday: days.sunday,
        }
    }
}

impl From<WeekPlan> for ActiveDays {
    fn from(plan: WeekPlan) -> Self {
        Self {
            monday: plan.monday,
            tuesday: plan.tuesday,
            wednesday: plan.wednesday,
            thursday: plan.thursday,
            friday: plan.friday,
            saturday: plan.saturday,
            sunday: plan.sunday,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trainer_edit_validation() {
        let valid: TrainerEdit = serde_json::from_value(json!({
            "email": "coach@example.com",
            "coach_experience": 12,
            "sports": ["rowing"]
        }))
        .unwrap();
        assert!(valid.validate().is_ok());

        let bad_email = TrainerEdit {
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert!(bad_email.validate().is_err());

        let bad_experience = TrainerEdit {
            coach_experience: Some(-1),
            ..Default::default()
        };
        assert!(bad_experience.validate().is_err());

        let empty_name = TrainerEdit {
            first_name: Some(String::new()),
            ..Default::default()
        };
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_week_plan_defaults_missing_days_to_inactive() {
        let plan: WeekPlan = serde_json::from_value(json!({ "monday": true })).unwrap();
        assert_eq!(
            plan,
            WeekPlan {
                monday: true,
                ..WeekPlan::default()
            }
        );
    }
}
