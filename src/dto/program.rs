use chrono::NaiveDate;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::models::{NewSportActivity, NewTrainingProgram, Weekday};

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_program_dates"))]
pub struct CreateTrainingProgram {
    #[validate(range(min = 1, message = "trainee_id must be a positive id"))]
    pub trainee_id: i64,
    #[validate(length(min = 1, max = 120, message = "title must be 1-120 characters"))]
    pub title: String,
    #[validate(length(max = 2000, message = "description must be at most 2000 characters"))]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

fn validate_program_dates(program: &CreateTrainingProgram) -> Result<(), ValidationError> {
    if program.start_date > program.end_date {
        let mut err = ValidationError::new("date_range");
        err.message = Some("start_date must not be after end_date".into());
        return Err(err);
    }
    Ok(())
}

impl CreateTrainingProgram {
    pub fn into_new_program(self, trainer_id: i64) -> NewTrainingProgram {
        NewTrainingProgram {
            trainer_id,
            trainee_id: self.trainee_id,
            title: self.title,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddSportActivity {
    #[validate(range(min = 1, message = "program_id must be a positive id"))]
    pub program_id: i64,
    #[validate(length(min = 1, max = 120, message = "name must be 1-120 characters"))]
    pub name: String,
    pub day: Weekday,
    #[validate(range(min = 1, max = 100, message = "sets must be between 1 and 100"))]
    pub sets: i32,
    #[validate(range(min = 0, max = 1000, message = "repetitions must be between 0 and 1000"))]
    pub repetitions: i32,
    #[validate(range(min = 0, max = 600, message = "duration_minutes must be between 0 and 600"))]
    pub duration_minutes: i32,
}

impl From<AddSportActivity> for NewSportActivity {
    fn from(activity: AddSportActivity) -> Self {
        Self {
            program_id: activity.program_id,
            name: activity.name,
            day: activity.day,
            sets: activity.sets,
            repetitions: activity.repetitions,
            duration_minutes: activity.duration_minutes,
        }
    }
}
