//! Shared harness for HTTP integration suites.
//!
//! Builds the production app over the in-memory stores and offers helpers
//! for signing up, submitting forms and reading redirects.

use actix_http::Request;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{test as actix_test, web};

use recipe_backend::domain::ports::UserRepository;
use recipe_backend::domain::{Ingredient, Recipe, RecipeId, UserId, Username};
use recipe_backend::inbound::http::health::HealthState;
use recipe_backend::server::{AppDependencies, SESSION_COOKIE, build_app};
use recipe_backend::test_support::InMemoryStores;

pub const PASSWORD: &str = "correct-horse-battery";

/// The app under test plus direct handles on its stores.
pub struct Harness<S> {
    pub app: S,
    pub stores: InMemoryStores,
    pub health: web::Data<HealthState>,
}

/// Build the app over fresh in-memory stores.
pub async fn harness()
-> Harness<impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>> {
    let stores = InMemoryStores::new();
    let health = web::Data::new(HealthState::new());
    let app = actix_test::init_service(build_app(AppDependencies {
        health_state: health.clone(),
        http_state: web::Data::new(stores.http_state().expect("views compile")),
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    }))
    .await;
    Harness {
        app,
        stores,
        health,
    }
}

impl<S> Harness<S>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    /// Register `username` and return the session cookie it was issued.
    pub async fn sign_up(&self, username: &str) -> Cookie<'static> {
        let body = format!("username={username}&password={PASSWORD}&confirm_password={PASSWORD}");
        let res = self.post("/auth/sign-up", None, body).await;
        assert_redirect(&res, "/");
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE)
            .map(Cookie::into_owned)
            .expect("session cookie issued at sign-up")
    }

    pub async fn user_id(&self, username: &str) -> UserId {
        let username = Username::new(username).expect("valid username");
        let account = self
            .stores
            .users
            .find_by_username(&username)
            .await
            .expect("user lookup")
            .expect("user exists");
        *account.user.id()
    }

    pub fn seed_ingredient(&self, name: &str) -> Ingredient {
        self.stores.ingredients.seed(name)
    }

    pub fn recipes(&self) -> Vec<Recipe> {
        self.stores.recipes.snapshot()
    }

    pub fn recipe(&self, id: &RecipeId) -> Option<Recipe> {
        self.stores.recipes.get(id)
    }

    pub async fn get(&self, uri: &str, cookie: Option<&Cookie<'static>>) -> ServiceResponse {
        let mut req = actix_test::TestRequest::get().uri(uri);
        if let Some(cookie) = cookie {
            req = req.cookie(cookie.clone());
        }
        actix_test::call_service(&self.app, req.to_request()).await
    }

    pub async fn post(
        &self,
        uri: &str,
        cookie: Option<&Cookie<'static>>,
        body: impl Into<String>,
    ) -> ServiceResponse {
        let mut req = actix_test::TestRequest::post()
            .uri(uri)
            .insert_header((
                header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            ))
            .set_payload(body.into());
        if let Some(cookie) = cookie {
            req = req.cookie(cookie.clone());
        }
        actix_test::call_service(&self.app, req.to_request()).await
    }

    /// Fetch a page and return its body, asserting a 200.
    pub async fn page(&self, uri: &str, cookie: &Cookie<'static>) -> String {
        let res = self.get(uri, Some(cookie)).await;
        assert_eq!(res.status(), StatusCode::OK, "GET {uri}");
        let body = actix_test::read_body(res).await;
        String::from_utf8(body.to_vec()).expect("utf-8 page")
    }
}

pub fn location(res: &ServiceResponse) -> Option<&str> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

pub fn assert_redirect(res: &ServiceResponse, expected: &str) {
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(res), Some(expected));
}

/// Form body for a recipe with the given ingredient ids.
pub fn recipe_form(name: &str, instructions: &str, ingredients: &[&Ingredient]) -> String {
    let mut body = format!("name={name}&instructions={instructions}");
    for ingredient in ingredients {
        body.push_str(&format!("&ingredients={}", ingredient.id));
    }
    body
}
