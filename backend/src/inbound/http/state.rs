//! Shared HTTP adapter state.
//!
//! Page handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and the view renderer, and remain
//! testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountService, IngredientCatalog, RecipeCommand, RecipeQuery};

use super::views::Views;

/// Parameter object bundling the driving ports used by page handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub accounts: Arc<dyn AccountService>,
    pub ingredients: Arc<dyn IngredientCatalog>,
    pub recipes: Arc<dyn RecipeCommand>,
    pub recipes_query: Arc<dyn RecipeQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountService>,
    pub ingredients: Arc<dyn IngredientCatalog>,
    pub recipes: Arc<dyn RecipeCommand>,
    pub recipes_query: Arc<dyn RecipeQuery>,
    pub views: Arc<Views>,
}

impl HttpState {
    /// Construct state from the port bundle and compiled views.
    pub fn new(ports: HttpStatePorts, views: Arc<Views>) -> Self {
        let HttpStatePorts {
            accounts,
            ingredients,
            recipes,
            recipes_query,
        } = ports;
        Self {
            accounts,
            ingredients,
            recipes,
            recipes_query,
            views,
        }
    }
}
