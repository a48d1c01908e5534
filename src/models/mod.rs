// Domain models owned by the trainer service

pub mod program;
pub mod report;
pub mod request;
pub mod trainer;

pub use program::*;
pub use report::*;
pub use request::*;
pub use trainer::*;
