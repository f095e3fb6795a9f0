use axum_extra::extract::cookie::{Cookie, SameSite};

use enroll_core::SessionToken;

// Create cookie carrying a freshly minted session token
pub fn create_session_cookie(token: SessionToken, cookie_name: &str) -> Cookie<'_> {
    Cookie::build((cookie_name, token.into_inner()))
        .path("/") // apply cookie to all URLs on the server
        .http_only(true) // prevent JavaScript from accessing the cookie
        .secure(true)
        .same_site(SameSite::Lax) // send cookie with "same-site" requests, and with "cross-site" top-level navigations.
        .build()
}
