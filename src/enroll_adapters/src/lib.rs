//! Infrastructure adapters for the enroll service.
//!
//! Persistence backends for the `UserStore` port, sign-in provider
//! implementations for the `SessionProvider` port, the axum HTTP routes, and
//! service configuration.

pub mod config;
pub mod http;
pub mod persistence;
pub mod session;

// Re-export the adapters most callers wire together
pub use persistence::{HashMapUserStore, PostgresUserStore};
pub use session::{JwtSessionConfig, JwtSessionProvider, MockSessionProvider};
