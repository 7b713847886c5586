//! Sign-up, sign-in and sign-out pages.
//!
//! ```text
//! GET  /auth/sign-up   POST /auth/sign-up  username, password, confirm_password
//! GET  /auth/sign-in   POST /auth/sign-in  username, password
//! GET  /auth/sign-out
//! ```

use actix_web::{get, post, web};
use serde_json::json;

use super::error::{OrRedirect, PageResult, see_other};
use super::forms::{FormFields, sign_in_credentials, sign_up_credentials};
use super::session::SessionContext;
use super::state::HttpState;
use super::views::Page;

const SIGN_UP_PATH: &str = "/auth/sign-up";
const SIGN_IN_PATH: &str = "/auth/sign-in";

/// Register the `/auth` scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(sign_up_form)
            .service(sign_up)
            .service(sign_in_form)
            .service(sign_in)
            .service(sign_out),
    );
}

#[get("/sign-up")]
pub async fn sign_up_form(state: web::Data<HttpState>, session: SessionContext) -> PageResult {
    let user = session.user().or_redirect("/")?;
    state
        .views
        .page(Page::SignUp, "Sign up", user.as_ref(), &json!({}))
        .or_redirect("/")
}

/// Create an account and sign it in.
#[post("/sign-up")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Bytes,
) -> PageResult {
    let credentials = sign_up_credentials(&FormFields::from(body)).or_redirect(SIGN_UP_PATH)?;
    let user = state
        .accounts
        .sign_up(&credentials)
        .await
        .or_redirect(SIGN_UP_PATH)?;
    session.persist_user(&user).or_redirect(SIGN_UP_PATH)?;
    Ok(see_other("/"))
}

#[get("/sign-in")]
pub async fn sign_in_form(state: web::Data<HttpState>, session: SessionContext) -> PageResult {
    let user = session.user().or_redirect("/")?;
    state
        .views
        .page(Page::SignIn, "Sign in", user.as_ref(), &json!({}))
        .or_redirect("/")
}

/// Verify credentials and start a session.
#[post("/sign-in")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Bytes,
) -> PageResult {
    let credentials = sign_in_credentials(&FormFields::from(body)).or_redirect(SIGN_IN_PATH)?;
    let user = state
        .accounts
        .sign_in(&credentials)
        .await
        .or_redirect(SIGN_IN_PATH)?;
    session.persist_user(&user).or_redirect(SIGN_IN_PATH)?;
    Ok(see_other("/"))
}

#[get("/sign-out")]
pub async fn sign_out(session: SessionContext) -> PageResult {
    session.clear();
    Ok(see_other("/"))
}
