//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations: remember the signed-in user, read it back,
//! forget it.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, User, UserId, Username};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const USERNAME_KEY: &str = "username";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's identity in the session cookie.
    ///
    /// The session id is renewed first so a pre-login cookie cannot be
    /// replayed as an authenticated one.
    pub fn persist_user(&self, user: &User) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user.id().to_string())
            .and_then(|()| self.0.insert(USERNAME_KEY, user.username().as_ref()))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the signed-in user, if any.
    ///
    /// Entries that fail validation are treated as absent.
    pub fn user(&self) -> Result<Option<User>, Error> {
        let read = |key: &str| {
            self.0
                .get::<String>(key)
                .map_err(|error| Error::internal(format!("failed to read session: {error}")))
        };
        let (Some(raw_id), Some(raw_name)) = (read(USER_ID_KEY)?, read(USERNAME_KEY)?) else {
            return Ok(None);
        };

        match (UserId::new(raw_id), Username::new(raw_name)) {
            (Ok(id), Ok(username)) => Ok(Some(User::new(id, username))),
            (Err(error), _) | (_, Err(error)) => {
                tracing::warn!("invalid user identity in session cookie: {error}");
                Ok(None)
            }
        }
    }

    /// Drop every session entry and expire the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};

    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};

    const USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn fixture_user() -> User {
        User::try_from_strings(USER_ID, "chef_ada").expect("fixture user")
    }

    async fn describe(session: SessionContext) -> HttpResponse {
        match session.user() {
            Ok(Some(user)) => HttpResponse::Ok().body(format!("{}:{}", user.id(), user.username())),
            Ok(None) => HttpResponse::Ok().body("anonymous"),
            Err(_) => HttpResponse::InternalServerError().finish(),
        }
    }

    #[actix_web::test]
    async fn round_trips_user_identity() {
        let app = actix_test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        session
                            .persist_user(&fixture_user())
                            .map_err(actix_web::error::ErrorInternalServerError)?;
                        Ok::<_, actix_web::Error>(HttpResponse::Ok())
                    }),
                )
                .route("/get", web::get().to(describe)),
        )
        .await;

        let set_res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = session_cookie(&set_res);

        let body = actix_test::call_and_read_body(
            &app,
            actix_test::TestRequest::get().uri("/get").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(body, format!("{USER_ID}:chef_ada").as_bytes());
    }

    #[actix_web::test]
    async fn tampered_identity_reads_as_anonymous() {
        let app = actix_test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/set-invalid",
                    web::get().to(|session: Session| async move {
                        session
                            .insert(USER_ID_KEY, "not-a-uuid")
                            .expect("set invalid user id");
                        session
                            .insert(USERNAME_KEY, "chef_ada")
                            .expect("set username");
                        HttpResponse::Ok()
                    }),
                )
                .route("/get", web::get().to(describe)),
        )
        .await;

        let set_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/set-invalid").to_request(),
        )
        .await;
        let cookie = session_cookie(&set_res);

        let body = actix_test::call_and_read_body(
            &app,
            actix_test::TestRequest::get().uri("/get").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(body, "anonymous".as_bytes());
    }

    #[actix_web::test]
    async fn clear_forgets_the_user() {
        let app = actix_test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        session
                            .persist_user(&fixture_user())
                            .map_err(actix_web::error::ErrorInternalServerError)?;
                        Ok::<_, actix_web::Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/clear",
                    web::get().to(|session: SessionContext| async move {
                        session.clear();
                        HttpResponse::Ok()
                    }),
                ),
        )
        .await;

        let set_res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/set").to_request()).await;
        let cookie = session_cookie(&set_res);
        let clear_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/clear").cookie(cookie).to_request(),
        )
        .await;

        let removal = clear_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("purge emits a removal cookie");
        assert_eq!(removal.value(), "");
    }
}
