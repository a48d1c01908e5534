// Business logic services

pub mod errors;
pub mod trainer_service;

pub use errors::ServiceError;
pub use trainer_service::TrainerService;
