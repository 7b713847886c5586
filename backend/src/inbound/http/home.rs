//! Home page and the signed-in greeting.
//!
//! ```text
//! GET /
//! GET /vip-lounge
//! ```

use actix_web::{HttpResponse, get, web};
use serde_json::json;
use tracing::warn;

use super::error::{OrRedirect, PageResult};
use super::guard::CurrentUser;
use super::session::SessionContext;
use super::state::HttpState;
use super::views::Page;

/// Render the landing page, showing the user when signed in.
#[get("/")]
pub async fn home(state: web::Data<HttpState>, session: SessionContext) -> PageResult {
    let user = session.user().unwrap_or_else(|error| {
        warn!(%error, "ignoring unreadable session on home page");
        None
    });
    state
        .views
        .page(Page::Home, "Home", user.as_ref(), &json!({}))
        .or_redirect("/auth/sign-in")
}

/// Plain-text greeting for signed-in users.
#[get("/vip-lounge")]
pub async fn vip_lounge(user: CurrentUser) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(format!("Welcome to the VIP lounge, {}!", user.user().username()))
}
