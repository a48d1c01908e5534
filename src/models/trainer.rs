use serde::{Deserialize, Serialize};

/// Account data shared by trainers and trainees
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Days of the week a trainer takes sessions
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActiveDays {
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trainer {
    pub id: i64,
    pub user_id: i64,
    pub user: User,
    pub user_name: String,
    pub status: String,
    pub coach_experience: i32,
    pub contact: String,
    pub language: String,
    pub country: String,
    pub sports: Vec<String>,
    pub achievements: String,
    pub education: String,
    pub trainee_ids: Vec<i64>,
    pub active_days: ActiveDays,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trainee {
    pub id: i64,
    pub user_id: i64,
    pub user: User,
}

/// Partial profile update; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default)]
pub struct TrainerProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub user_name: Option<String>,
    pub status: Option<String>,
    pub coach_experience: Option<i32>,
    pub contact: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub sports: Option<Vec<String>>,
    pub achievements: Option<String>,
    pub education: Option<String>,
    pub active_days: Option<ActiveDays>,
}

impl TrainerProfileUpdate {
    /// Apply the update in place, used by stores that keep whole records
    pub fn apply_to(self, trainer: &mut Trainer) {
        if let Some(first_name) = self.first_name {
            trainer.user.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            trainer.user.last_name = last_name;
        }
        if let Some(email) = self.email {
            trainer.user.email = email;
        }
        if let Some(user_name) = self.user_name {
            trainer.user_name = user_name;
        }
        if let Some(status) = self.status {
            trainer.status = status;
        }
        if let Some(coach_experience) = self.coach_experience {
            trainer.coach_experience = coach_experience;
        }
        if let Some(contact) = self.contact {
            trainer.contact = contact;
        }
        if let Some(language) = self.language {
            trainer.language = language;
        }
        if let Some(country) = self.country {
            trainer.country = country;
        }
        if let Some(sports) = self.sports {
            trainer.sports = sports;
        }
        if let Some(achievements) = self.achievements {
            trainer.achievements = achievements;
        }
        if let Some(education) = self.education {
            trainer.education = education;
        }
        if let Some(active_days) = self.active_days {
            trainer.active_days = active_days;
        }
    }
}
