//! Builders wiring Diesel repositories into the domain services behind
//! [`HttpState`].

use std::sync::Arc;

use crate::domain::ports::{RecipeCommand, RecipeQuery};
use crate::domain::{IngredientCatalogService, RecipeService, UserAccountsService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::inbound::http::views::Views;
use crate::outbound::persistence::{
    DbPool, DieselIngredientRepository, DieselRecipeRepository, DieselUserRepository,
};

/// One service value serving both halves of a command/query port pair.
fn build_service_pair<S, Cmd, Query>(
    service: S,
    cast: fn(Arc<S>) -> (Arc<Cmd>, Arc<Query>),
) -> (Arc<Cmd>, Arc<Query>)
where
    Cmd: ?Sized,
    Query: ?Sized,
{
    cast(Arc::new(service))
}

fn build_recipe_pair(pool: &DbPool) -> (Arc<dyn RecipeCommand>, Arc<dyn RecipeQuery>) {
    build_service_pair(
        RecipeService::new(
            Arc::new(DieselRecipeRepository::new(pool.clone())),
            Arc::new(DieselIngredientRepository::new(pool.clone())),
        ),
        |service| {
            (
                service.clone() as Arc<dyn RecipeCommand>,
                service as Arc<dyn RecipeQuery>,
            )
        },
    )
}

/// Build the port bundle over a live database pool.
pub(crate) fn build_ports(pool: &DbPool) -> HttpStatePorts {
    let (recipes, recipes_query) = build_recipe_pair(pool);
    HttpStatePorts {
        accounts: Arc::new(UserAccountsService::new(Arc::new(
            DieselUserRepository::new(pool.clone()),
        ))),
        ingredients: Arc::new(IngredientCatalogService::new(Arc::new(
            DieselIngredientRepository::new(pool.clone()),
        ))),
        recipes,
        recipes_query,
    }
}

/// Shared handler state: Diesel-backed ports plus compiled views.
pub(crate) fn build_http_state(pool: &DbPool, views: Arc<Views>) -> HttpState {
    HttpState::new(build_ports(pool), views)
}
