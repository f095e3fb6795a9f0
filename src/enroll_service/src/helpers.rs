use enroll_adapters::config::EnrollSetting;
use secrecy::ExposeSecret;
use sqlx::{PgPool, postgres::PgPoolOptions};

/// Configure and return a PostgreSQL connection pool
///
/// This function loads the database URL from configuration, creates a
/// connection pool, and runs all pending migrations.
///
/// # Panics
/// Panics if the URL is not configured, the pool cannot be created, or
/// migrations fail
pub async fn configure_postgresql() -> PgPool {
    let config = EnrollSetting::load();
    let db_url = config
        .postgres
        .url
        .as_ref()
        .expect("postgres.url is not configured")
        .expose_secret();

    let pg_pool = get_postgres_pool(db_url)
        .await
        .expect("Failed to create Postgres connection pool");

    // Run database migrations
    sqlx::migrate!("./migrations")
        .run(&pg_pool)
        .await
        .expect("Failed to run migrations");

    pg_pool
}

/// Create a PostgreSQL connection pool
///
/// # Arguments
/// * `url` - Database connection URL
pub async fn get_postgres_pool(url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new().max_connections(5).connect(url).await
}
