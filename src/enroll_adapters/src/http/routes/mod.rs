//! Axum route handlers for the credential form submissions.
//!
//! The routes extract raw form fields, parse them into domain credentials,
//! run the matching use case, and report one of the fixed action statuses the
//! form client drives its messaging from.

pub mod error;
pub mod login;
pub mod register;

pub use error::{AuthApiError, ErrorResponse};
pub use login::{LoginActionState, LoginRequest, LoginStatus, login};
pub use register::{RegisterActionState, RegisterRequest, RegisterStatus, register};
