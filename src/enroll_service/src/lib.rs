pub mod enroll_service;
pub mod helpers;
pub mod tracing;

pub use enroll_service::EnrollService;
pub use helpers::{configure_postgresql, get_postgres_pool};
