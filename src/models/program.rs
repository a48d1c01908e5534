use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainingProgram {
    pub id: i64,
    pub trainer_id: i64,
    pub trainee_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTrainingProgram {
    pub trainer_id: i64,
    pub trainee_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "monday" => Some(Weekday::Monday),
            "tuesday" => Some(Weekday::Tuesday),
            "wednesday" => Some(Weekday::Wednesday),
            "thursday" => Some(Weekday::Thursday),
            "friday" => Some(Weekday::Friday),
            "saturday" => Some(Weekday::Saturday),
            "sunday" => Some(Weekday::Sunday),
            _ => None,
        }
    }
}

/// A single exercise slot inside a training program
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SportActivity {
    pub id: i64,
    pub program_id: i64,
    pub name: String,
    pub day: Weekday,
    pub sets: i32,
    pub repetitions: i32,
    pub duration_minutes: i32,
}

#[derive(Debug, Clone)]
pub struct NewSportActivity {
    pub program_id: i64,
    pub name: String,
    pub day: Weekday,
    pub sets: i32,
    pub repetitions: i32,
    pub duration_minutes: i32,
}
