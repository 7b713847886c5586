//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns:
//! trace correlation and HTML form method override.

pub mod method_override;
pub mod trace;

pub use method_override::MethodOverride;
pub use trace::Trace;
