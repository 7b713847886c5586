//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while turning every
//! handler failure into a logged `303 See Other` redirect to the route's
//! fallback page. No error payload reaches the client; the trace id in the
//! log line and the `trace-id` response header tie the two together.

use std::fmt;

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, ResponseError};
use tracing::{debug, error, info};

use crate::domain::{Error, ErrorCode};

/// Result alias for page handlers.
pub type PageResult = Result<HttpResponse, FailureRedirect>;

/// Build a `303 See Other` response pointing at `location`.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use recipe_backend::inbound::http::error::see_other;
///
/// let response = see_other("/recipes");
/// assert_eq!(response.status(), StatusCode::SEE_OTHER);
/// ```
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_owned()))
        .finish()
}

/// A logged domain failure that responds with a redirect.
#[derive(Debug, Clone)]
pub struct FailureRedirect {
    error: Error,
    location: String,
}

impl FailureRedirect {
    /// Log `error` and prepare a redirect to `location`.
    pub fn new(error: Error, location: impl Into<String>) -> Self {
        let location = location.into();
        log_failure(&error, &location);
        Self { error, location }
    }

    /// Underlying domain error.
    pub fn error(&self) -> &Error {
        &self.error
    }

    /// Redirect target.
    pub fn location(&self) -> &str {
        self.location.as_str()
    }
}

fn log_failure(error: &Error, location: &str) {
    let code = error.code().as_str();
    let trace_id = error.trace_id().unwrap_or("-");
    match error.code() {
        ErrorCode::NotFound => {
            debug!(code, trace_id, redirect = location, "request denied: {}", error.message());
        }
        ErrorCode::InvalidRequest
        | ErrorCode::Unauthorized
        | ErrorCode::Forbidden
        | ErrorCode::Conflict => {
            info!(code, trace_id, redirect = location, "request rejected: {}", error.message());
        }
        _ => {
            error!(code, trace_id, redirect = location, "request failed: {}", error.message());
        }
    }
}

impl fmt::Display for FailureRedirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (redirecting to {})", self.error, self.location)
    }
}

impl ResponseError for FailureRedirect {
    fn status_code(&self) -> StatusCode {
        StatusCode::SEE_OTHER
    }

    fn error_response(&self) -> HttpResponse {
        see_other(&self.location)
    }
}

/// Attach a fallback redirect to a fallible domain call.
pub trait OrRedirect<T> {
    /// Convert an `Err` into a logged [`FailureRedirect`] to `location`.
    fn or_redirect(self, location: &str) -> Result<T, FailureRedirect>;
}

impl<T> OrRedirect<T> for Result<T, Error> {
    fn or_redirect(self, location: &str) -> Result<T, FailureRedirect> {
        self.map_err(|error| FailureRedirect::new(error, location))
    }
}

#[cfg(test)]
mod tests;
