use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A free-text report filed by an authenticated user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub id: i64,
    pub user_id: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReport {
    pub user_id: i64,
    pub description: String,
}
