//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed domain entities used by the HTTP and
//! persistence layers, plus the services implementing the driving ports.
//! Keep types immutable and document invariants in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, UserId, Username, UserAccount: identities and stored accounts.
//! - Credentials, PasswordHash: sign-in inputs and Argon2id hashes.
//! - Ingredient, IngredientId, NewIngredient: shared catalogue entries.
//! - Recipe, RecipeId, RecipeDraft, PopulatedRecipe, belongs_to: recipes
//!   and the ownership predicate.
//! - UserAccountsService, IngredientCatalogService, RecipeService.

pub mod auth;
pub mod error;
pub mod ingredient;
pub mod ports;
pub mod recipe;
pub mod trace_id;
pub mod user;

mod account_service;
mod ingredient_service;
mod persistence_error_mapping;
mod recipe_service;

pub use self::account_service::UserAccountsService;
pub use self::auth::{Credentials, CredentialsValidationError, PASSWORD_MIN, PasswordHash};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ingredient::{
    INGREDIENT_TEXT_MAX, Ingredient, IngredientId, IngredientValidationError, NewIngredient,
};
pub use self::ingredient_service::IngredientCatalogService;
pub use self::recipe::{
    INSTRUCTIONS_MAX, PopulatedRecipe, RECIPE_NAME_MAX, Recipe, RecipeDraft, RecipeId,
    RecipeValidationError, belongs_to,
};
pub use self::recipe_service::RecipeService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    USERNAME_MAX, USERNAME_MIN, User, UserAccount, UserId, UserValidationError, Username,
};

/// Convenient domain result alias.
///
/// # Examples
/// ```
/// use recipe_backend::domain::{DomainResult, Error};
///
/// fn lookup() -> DomainResult<()> {
///     Err(Error::not_found("recipe not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
