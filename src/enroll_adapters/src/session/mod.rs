pub mod jwt_session_provider;
pub mod mock_session_provider;
pub mod session_cookie;

pub use jwt_session_provider::{JwtSessionConfig, JwtSessionProvider};
pub use mock_session_provider::MockSessionProvider;
pub use session_cookie::create_session_cookie;
