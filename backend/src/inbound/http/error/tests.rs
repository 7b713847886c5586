//! Tests for HTTP failure redirects.

use super::*;
use crate::domain::{Error, TraceId};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use rstest_bdd_macros::{given, then, when};

fn location_of(response: &HttpResponse) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect carries a Location header")
        .to_str()
        .expect("Location is ASCII")
}

#[rstest]
#[case(Error::not_found("recipe not found"), "/recipes")]
#[case(Error::service_unavailable("database down"), "/")]
#[case(Error::internal("boom"), "/")]
#[case(Error::invalid_request("bad"), "/ingredients")]
fn every_failure_is_a_see_other_redirect(#[case] error: Error, #[case] location: &str) {
    let failure = FailureRedirect::new(error, location);

    let response = ResponseError::error_response(&failure);

    assert_eq!(ResponseError::status_code(&failure), StatusCode::SEE_OTHER);
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&response), location);
}

#[rstest]
fn or_redirect_keeps_success_untouched() {
    let ok: Result<u8, Error> = Ok(7);
    assert_eq!(ok.or_redirect("/").expect("success passes through"), 7);
}

#[rstest]
fn or_redirect_preserves_the_domain_error() {
    let err: Result<(), Error> = Err(Error::conflict("username chef is already taken"));

    let failure = err.or_redirect("/auth/sign-up").expect_err("error converts");

    assert_eq!(failure.error().code(), ErrorCode::Conflict);
    assert_eq!(failure.location(), "/auth/sign-up");
}

#[actix_web::test]
async fn handler_failures_render_without_a_body() {
    let app = actix_test::init_service(App::new().route(
        "/boom",
        web::get().to(|| async {
            Err::<HttpResponse, _>(Error::internal("boom")).or_redirect("/")
        }),
    ))
    .await;

    let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/boom").to_request()).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        res.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
        Some("/")
    );
    let body = actix_test::read_body(res).await;
    assert!(body.is_empty());
}

#[given("a trace id for the current request")]
fn a_trace_id_for_the_current_request() -> TraceId {
    TraceId::generate()
}

#[when("a store failure is redirected inside that request")]
fn a_store_failure_is_redirected(trace_id: TraceId) -> FailureRedirect {
    crate::domain::trace_id::TRACE_ID.sync_scope(trace_id, || {
        Err::<(), _>(Error::service_unavailable("connection refused"))
            .or_redirect("/")
            .expect_err("store failure converts")
    })
}

#[then("the logged error still carries the request trace id")]
fn the_logged_error_carries_the_trace_id(trace_id: TraceId, failure: FailureRedirect) {
    let expected = trace_id.to_string();
    assert_eq!(failure.error().trace_id(), Some(expected.as_str()));
    assert_eq!(failure.location(), "/");
}

#[rstest]
fn redirects_keep_trace_correlation() {
    let trace_id = a_trace_id_for_the_current_request();
    let failure = a_store_failure_is_redirected(trace_id);
    the_logged_error_carries_the_trace_id(trace_id, failure);
}
