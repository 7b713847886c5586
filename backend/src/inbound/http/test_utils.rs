//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

/// Cookie name used by [`test_session_middleware`].
pub const TEST_SESSION_COOKIE: &str = "session";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(TEST_SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by `res`, panicking when absent.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == TEST_SESSION_COOKIE)
        .map(Cookie::into_owned)
        .expect("session cookie set")
}
