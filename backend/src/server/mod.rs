//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use crate::inbound::http::health::{self, HealthState};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::Views;
use crate::inbound::http::{accounts, home, ingredients, recipes};
use crate::middleware::{MethodOverride, Trace};

use state_builders::build_http_state;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Per-worker inputs for [`build_app`].
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

/// Register every page route. Unmatched paths fall through to 404.
pub fn configure_pages(cfg: &mut web::ServiceConfig) {
    cfg.service(home::home).service(home::vip_lounge);
    accounts::configure(cfg);
    recipes::configure(cfg);
    ingredients::configure(cfg);
}

/// Assemble the application: tracing outermost, then method override so
/// routing sees the rewritten method, then sessions.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .service(health::ready)
        .service(health::live)
        .configure(configure_pages)
        .wrap(session)
        .wrap(MethodOverride)
        .wrap(Trace)
}

/// Construct an Actix HTTP server over the configured database pool.
///
/// Readiness flips once the listener is bound.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the views fail to compile or binding the
/// socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let views = Views::new().map_err(std::io::Error::other)?;
    let http_state = web::Data::new(build_http_state(&config.db_pool, Arc::new(views)));
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool: _,
    } = config;

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "server listening");
    health_state.mark_ready();
    Ok(server)
}
