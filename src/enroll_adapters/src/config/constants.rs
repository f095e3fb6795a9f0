pub mod env {
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
    pub const JWT_SECRET_ENV_VAR: &str = "JWT_SECRET";
    pub const ALLOWED_ORIGINS_ENV_VAR: &str = "ENROLL_ALLOWED_ORIGINS";
}

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub const ASSETS_DIR: &str = "assets";
    pub const SESSION_COOKIE_NAME: &str = "enroll_session";
    pub const SESSION_TOKEN_TTL_SECONDS: i64 = 600;
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
}
