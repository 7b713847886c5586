//! Shared ingredient catalogue.
//!
//! ```text
//! GET  /ingredients   list every ingredient
//! POST /ingredients   name, category (optional)
//! ```

use actix_web::{get, post, web};
use serde::Serialize;

use super::error::{OrRedirect, PageResult, see_other};
use super::forms::{FormFields, new_ingredient};
use super::guard::CurrentUser;
use super::state::HttpState;
use super::views::Page;
use crate::domain::Ingredient;

const INGREDIENTS_PATH: &str = "/ingredients";

/// Register catalogue routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_ingredients).service(create_ingredient);
}

#[derive(Serialize)]
struct IngredientList<'a> {
    ingredients: &'a [Ingredient],
}

#[get("/ingredients")]
pub async fn list_ingredients(state: web::Data<HttpState>, user: CurrentUser) -> PageResult {
    let ingredients = state.ingredients.list().await.or_redirect("/")?;
    state
        .views
        .page(
            Page::IngredientsIndex,
            "Ingredients",
            Some(user.user()),
            &IngredientList {
                ingredients: &ingredients,
            },
        )
        .or_redirect("/")
}

/// Add an entry to the catalogue; every signed-in user sees it.
#[post("/ingredients")]
pub async fn create_ingredient(
    state: web::Data<HttpState>,
    _user: CurrentUser,
    body: web::Bytes,
) -> PageResult {
    let ingredient = new_ingredient(&FormFields::from(body)).or_redirect(INGREDIENTS_PATH)?;
    state
        .ingredients
        .create(ingredient)
        .await
        .or_redirect(INGREDIENTS_PATH)?;
    Ok(see_other(INGREDIENTS_PATH))
}
