use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a trainee's request for a program
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Priced,
    Accepted,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Priced => "priced",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(RequestStatus::Pending),
            "priced" => Some(RequestStatus::Priced),
            "accepted" => Some(RequestStatus::Accepted),
            "rejected" => Some(RequestStatus::Rejected),
            _ => None,
        }
    }

    /// A price can only be (re)set before the trainee has answered
    pub fn accepts_price(&self) -> bool {
        matches!(self, RequestStatus::Pending | RequestStatus::Priced)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgramRequest {
    pub id: i64,
    pub trainer_id: i64,
    pub trainee_id: i64,
    pub trainee_name: String,
    pub price: Option<i64>,
    pub description: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_conversion() {
        for status in [
            RequestStatus::Pending,
            RequestStatus::Priced,
            RequestStatus::Accepted,
            RequestStatus::Rejected,
        ] {
            assert_eq!(RequestStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(RequestStatus::from_str("PRICED"), Some(RequestStatus::Priced));
        assert_eq!(RequestStatus::from_str("cancelled"), None);
    }

    #[test]
    fn test_price_only_settable_before_answer() {
        assert!(RequestStatus::Pending.accepts_price());
        assert!(RequestStatus::Priced.accepts_price());
        assert!(!RequestStatus::Accepted.accepts_price());
        assert!(!RequestStatus::Rejected.accepts_price());
    }
}
