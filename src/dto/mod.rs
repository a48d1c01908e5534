// Request payloads and response shapes for the trainer API

pub mod program;
pub mod report;
pub mod request;
pub mod trainer;

pub use program::*;
pub use report::*;
pub use request::*;
pub use trainer::*;

use serde::{Deserialize, Serialize};

/// Generic acknowledgement for create-style endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Response {
    pub message: String,
    pub success: bool,
    pub id: i64,
}

impl Response {
    pub fn created(message: &str, id: i64) -> Self {
        Self {
            message: message.to_string(),
            success: true,
            id,
        }
    }
}
