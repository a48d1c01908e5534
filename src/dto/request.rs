use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{ProgramRequest, RequestStatus};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestInTrainerPage {
    pub id: i64,
    pub trainee_name: String,
    pub date: DateTime<Utc>,
    pub price: Option<i64>,
    pub status: RequestStatus,
}

impl From<&ProgramRequest> for RequestInTrainerPage {
    fn from(request: &ProgramRequest) -> Self {
        Self {
            id: request.id,
            trainee_name: request.trainee_name.clone(),
            date: request.created_at,
            price: request.price,
            status: request.status,
        }
    }
}

/// Price quote for a trainee's request
///
/// The trainer is always the authenticated caller, so the payload carries
/// no trainer id.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TrainerSetPrice {
    #[validate(range(min = 1, message = "request_id must be a positive id"))]
    pub request_id: i64,
    #[validate(range(min = 1, max = 1_000_000, message = "price must be between 1 and 1000000"))]
    pub price: i64,
    #[validate(length(max = 2000, message = "description must be at most 2000 characters"))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgramRequestSetPrice {
    pub id: i64,
    pub trainer_id: i64,
    pub trainee_id: i64,
    pub price: Option<i64>,
    pub description: String,
    pub status: RequestStatus,
}

impl From<ProgramRequest> for ProgramRequestSetPrice {
    fn from(request: ProgramRequest) -> Self {
        Self {
            id: request.id,
            trainer_id: request.trainer_id,
            trainee_id: request.trainee_id,
            price: request.price,
            description: request.description,
            status: request.status,
        }
    }
}
