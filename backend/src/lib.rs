//! Recipe manager backend: signed-in users keep a private recipe book over a
//! shared ingredient catalogue.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use middleware::{MethodOverride, Trace};
