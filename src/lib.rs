//! # Enroll - Credential Login & Registration Library
//!
//! This is a facade crate that re-exports all public APIs from the enroll
//! service components. Use this crate to get access to the credential
//! handlers, stores, and service assembly in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! enroll = { path = "../enroll" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `Credentials`, `User`, etc.
//! - **Ports**: `UserStore`, `SessionProvider`
//! - **Use cases**: `LoginUseCase`, `RegisterUseCase`
//! - **Adapters**: `PostgresUserStore`, `HashMapUserStore`,
//!   `JwtSessionProvider`, `MockSessionProvider`, the axum routes
//! - **Service**: `EnrollService` - The main entry point for the service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use enroll_core::*;
}

// Re-export most commonly used core types at the root level
pub use enroll_core::{Credentials, Email, Password, SessionToken, User, UserError};

// ============================================================================
// Port Traits
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use enroll_core::{SessionError, SessionProvider, UserStore, UserStoreError};
}

// Re-export port traits at root level
pub use enroll_core::{SessionError, SessionProvider, UserStore, UserStoreError};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use enroll_application::*;
}

// Re-export use cases at root level
pub use enroll_application::{LoginError, LoginUseCase, RegisterError, RegisterUseCase};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use enroll_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use enroll_adapters::persistence::*;
    }

    /// Sign-in provider implementations
    pub mod session {
        pub use enroll_adapters::session::*;
    }

    /// Configuration
    pub mod config {
        pub use enroll_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use enroll_adapters::{
    persistence::{HashMapUserStore, PostgresUserStore},
    session::{JwtSessionConfig, JwtSessionProvider, MockSessionProvider},
};

// ============================================================================
// Enroll Service (Main Entry Point)
// ============================================================================

/// Main enroll service
pub use enroll_service::{EnrollService, configure_postgresql, get_postgres_pool};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
