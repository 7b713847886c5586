//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters;
//! driving ports (`AccountService`, `IngredientCatalog`, `RecipeCommand`,
//! `RecipeQuery`) are implemented by domain services and called by inbound
//! adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod ingredient_catalog;
mod ingredient_repository;
mod recipe_command;
mod recipe_query;
mod recipe_repository;
mod user_repository;

pub use account_service::AccountService;
pub use ingredient_catalog::IngredientCatalog;
#[cfg(test)]
pub use ingredient_repository::MockIngredientRepository;
pub use ingredient_repository::{IngredientRepository, IngredientRepositoryError};
pub use recipe_command::RecipeCommand;
pub use recipe_query::{RecipeEditForm, RecipeQuery};
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{RecipeRepository, RecipeRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
