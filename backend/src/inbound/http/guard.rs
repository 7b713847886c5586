//! Authorization guard for pages that require a signed-in user.
//!
//! [`CurrentUser`] is an extractor: a handler that names it in its signature
//! only runs when the session carries a valid identity. Otherwise the request
//! is answered with `303 See Other` to the home page and the handler is never
//! invoked.

use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use super::error::see_other;
use super::session::SessionContext;
use crate::domain::{User, UserId};

/// Where unauthenticated requests are sent.
pub const SIGNED_OUT_REDIRECT: &str = "/";

/// The signed-in user of the current request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    /// Identifier used to scope recipe operations.
    pub fn id(&self) -> &UserId {
        self.0.id()
    }

    /// Borrow the full user record.
    pub fn user(&self) -> &User {
        &self.0
    }
}

/// Rejection produced when no usable identity is in the session.
#[derive(Debug)]
pub struct Unauthenticated;

impl fmt::Display for Unauthenticated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("sign-in required")
    }
}

impl ResponseError for Unauthenticated {
    fn status_code(&self) -> StatusCode {
        StatusCode::SEE_OTHER
    }

    fn error_response(&self) -> HttpResponse {
        see_other(SIGNED_OUT_REDIRECT)
    }
}

impl FromRequest for CurrentUser {
    type Error = Unauthenticated;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let path = req.path().to_owned();
        Box::pin(async move {
            let session = session.await.map_err(|error| {
                debug!(%error, path = %path, "session unavailable; treating as signed out");
                Unauthenticated
            })?;
            match session.user() {
                Ok(Some(user)) => Ok(CurrentUser(user)),
                Ok(None) => {
                    debug!(path = %path, "unauthenticated request redirected");
                    Err(Unauthenticated)
                }
                Err(error) => {
                    debug!(error = %error, path = %path, "unreadable session; treating as signed out");
                    Err(Unauthenticated)
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header;
    use actix_web::{App, test as actix_test, web};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};

    #[actix_web::test]
    async fn missing_identity_redirects_without_calling_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let app = actix_test::init_service(App::new().wrap(test_session_middleware()).route(
            "/private",
            web::get().to(move |_user: CurrentUser| {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    HttpResponse::Ok().finish()
                }
            }),
        ))
        .await;

        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/private").to_request()).await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
            Some(SIGNED_OUT_REDIRECT)
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn signed_in_identity_reaches_handler() {
        let app = actix_test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/sign-in",
                    web::get().to(|session: SessionContext| async move {
                        let user = User::try_from_strings(
                            "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                            "chef_ada",
                        )
                        .expect("fixture user");
                        session
                            .persist_user(&user)
                            .map_err(actix_web::error::ErrorInternalServerError)?;
                        Ok::<_, actix_web::Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/private",
                    web::get().to(|user: CurrentUser| async move {
                        HttpResponse::Ok().body(user.user().username().to_string())
                    }),
                ),
        )
        .await;

        let signed_in =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/sign-in").to_request()).await;
        let cookie = session_cookie(&signed_in);

        let body = actix_test::call_and_read_body(
            &app,
            actix_test::TestRequest::get()
                .uri("/private")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(body, "chef_ada".as_bytes());
    }
}
