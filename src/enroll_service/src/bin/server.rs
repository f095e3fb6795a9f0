use color_eyre::eyre::Result;
use enroll_adapters::{
    JwtSessionConfig, JwtSessionProvider, PostgresUserStore, config::EnrollSetting,
};
use enroll_service::{EnrollService, configure_postgresql};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");

    // Load configuration
    let config = EnrollSetting::load();

    // Setup database connection pool and run migrations
    let pg_pool = configure_postgresql().await;

    // Create the user store
    let user_store = PostgresUserStore::new(pg_pool);

    // Create the sign-in provider on top of the same store
    let jwt_secret = config
        .session
        .jwt_secret
        .clone()
        .ok_or("session.jwt_secret is not configured")?;
    let session_provider = JwtSessionProvider::new(
        user_store.clone(),
        JwtSessionConfig {
            jwt_secret,
            token_ttl_in_seconds: config.session.token_ttl_in_seconds,
        },
    );

    // Create the enroll service
    let service = EnrollService::new(
        user_store,
        session_provider,
        config.app.assets_dir.clone(),
    );

    // Run as standalone server
    let listener = tokio::net::TcpListener::bind(&config.app.address).await?;
    tracing::info!("Starting enroll service...");

    service
        .run_standalone(listener, config.app.allowed_origins.clone())
        .await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
