//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the driven repository ports, backed by
//! `diesel-async` with `bb8` pooling. Adapters only translate between Diesel
//! rows and domain types; row structs (`models.rs`) and table definitions
//! (`schema.rs`) never leave this module.
//!
//! ```ignore
//! use recipe_backend::outbound::persistence::{DbPool, DieselRecipeRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/recipes")).await?;
//! let recipes = DieselRecipeRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_ingredient_repository;
mod diesel_recipe_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_ingredient_repository::DieselIngredientRepository;
pub use diesel_recipe_repository::DieselRecipeRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
