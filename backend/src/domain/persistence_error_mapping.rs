//! Shared mapping from port persistence failures to domain errors.
//!
//! Connection failures surface as `ServiceUnavailable`; everything else the
//! store reports is an internal error. Messages stay server-side: the HTTP
//! adapter only logs them.

use super::Error;
use super::ports::{IngredientRepositoryError, RecipeRepositoryError, UserPersistenceError};

pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::UniqueViolation { username } => {
            Error::conflict(format!("username {username} is already taken"))
        }
    }
}

pub(crate) fn map_ingredient_repository_error(error: IngredientRepositoryError) -> Error {
    match error {
        IngredientRepositoryError::Connection { message } => Error::service_unavailable(message),
        IngredientRepositoryError::Query { message } => Error::internal(message),
    }
}

pub(crate) fn map_recipe_repository_error(error: RecipeRepositoryError) -> Error {
    match error {
        RecipeRepositoryError::Connection { message } => Error::service_unavailable(message),
        RecipeRepositoryError::Query { message } => Error::internal(message),
    }
}
