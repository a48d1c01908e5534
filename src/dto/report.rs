use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReportRequest {
    #[validate(length(min = 1, max = 2000, message = "description must be 1-2000 characters"))]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportResponse {
    pub description: String,
}
