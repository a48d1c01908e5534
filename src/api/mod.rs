// API routes and handlers

pub mod errors;
pub mod health;
pub mod routes;
pub mod trainer;

pub use errors::ApiError;
