pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    credentials::Credentials,
    email::Email,
    password::{MIN_PASSWORD_LENGTH, Password},
    session_token::SessionToken,
    user::{User, UserError},
};

pub use ports::{
    repositories::{UserStore, UserStoreError},
    services::{SessionError, SessionProvider},
};
