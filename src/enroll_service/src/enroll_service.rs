use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::post,
};
use enroll_adapters::{
    config::AllowedOrigins,
    http::routes::{login, register},
};
use enroll_core::{SessionProvider, UserStore};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Main enroll service that provides the credential form routes
pub struct EnrollService {
    router: Router,
}

impl EnrollService {
    /// Create a new EnrollService with the provided store and sign-in provider
    ///
    /// # Arguments
    /// * `user_store` - Store for user records (must be Clone)
    /// * `session_provider` - Sign-in provider establishing sessions (must be Clone)
    /// * `assets_dir` - Directory holding the static form client
    ///
    /// # Note on Architecture
    /// Stores implement Clone via internal Arc (or pool handle) for thread-safe
    /// sharing. Each route is given its specific state requirements.
    pub fn new<U, P>(user_store: U, session_provider: P, assets_dir: String) -> Self
    where
        U: UserStore + Clone + 'static,
        P: SessionProvider + Clone + 'static,
    {
        let assets_service =
            ServeDir::new(assets_dir.clone()).fallback(ServeFile::new(assets_dir + "/index.html"));

        let router = Router::new()
            // Login only needs the sign-in provider
            .route("/login", post(login::<P>))
            .with_state(session_provider.clone())
            // Register needs the user store and the sign-in provider
            .route("/register", post(register::<U, P>))
            .with_state((user_store, session_provider))
            .fallback_service(assets_service);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the EnrollService into a nested router that can be mounted on
    /// another router
    ///
    /// # Arguments
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the enroll service as a standalone server
    ///
    /// # Arguments
    /// * `listener` - TCP listener to bind the server to
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Enroll service listening on {}", listener.local_addr()?);

        axum_server::Server::<std::net::SocketAddr>::from_listener(listener)
            .serve(router.into_make_service())
            .await
    }
}
