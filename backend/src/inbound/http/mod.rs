//! HTTP inbound adapter serving server-rendered pages.

pub mod accounts;
pub mod error;
pub mod forms;
pub mod guard;
pub mod health;
pub mod home;
pub mod ingredients;
pub mod recipes;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod views;

pub use error::{FailureRedirect, OrRedirect, PageResult};
pub use guard::CurrentUser;
