//! Recipe pages, all scoped to the signed-in user.
//!
//! ```text
//! GET    /recipes            list own recipes
//! GET    /recipes/new        creation form with the ingredient catalogue
//! POST   /recipes            name, instructions, ingredients (repeated)
//! GET    /recipes/{id}       detail
//! GET    /recipes/{id}/edit  edit form
//! PUT    /recipes/{id}       update (PATCH accepted)
//! DELETE /recipes/{id}       delete
//! ```
//!
//! Browsers reach PUT and DELETE through `POST ...?_method=`. A recipe that
//! does not exist, or belongs to somebody else, or whose id does not parse,
//! always ends in the same redirect to `/recipes`.

use actix_web::{delete, get, post, route, web};
use serde::Serialize;

use super::error::{OrRedirect, PageResult, see_other};
use super::forms::{FormFields, recipe_draft};
use super::guard::CurrentUser;
use super::state::HttpState;
use super::views::Page;
use crate::domain::{Error, Ingredient, PopulatedRecipe, RecipeId};

const RECIPES_PATH: &str = "/recipes";

/// Register recipe routes; `/recipes/new` precedes `/recipes/{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_recipes)
        .service(new_recipe_form)
        .service(create_recipe)
        .service(show_recipe)
        .service(edit_recipe_form)
        .service(update_recipe)
        .service(delete_recipe);
}

/// Unparseable ids are indistinguishable from unknown ones.
fn parse_recipe_id(raw: &str) -> Result<RecipeId, Error> {
    RecipeId::new(raw).map_err(|_| Error::not_found("recipe not found"))
}

#[derive(Serialize)]
struct RecipeList<'a> {
    recipes: &'a [PopulatedRecipe],
}

#[derive(Serialize)]
struct RecipeDetail<'a> {
    recipe: &'a PopulatedRecipe,
}

/// Edit forms list the stored references first, one checked input each, so
/// order and duplicates survive a resubmit; the catalogue follows unchecked.
#[derive(Serialize)]
struct RecipeForm<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    recipe: Option<&'a PopulatedRecipe>,
    catalogue: &'a [Ingredient],
}

#[get("/recipes")]
pub async fn list_recipes(state: web::Data<HttpState>, user: CurrentUser) -> PageResult {
    let recipes = state.recipes_query.list(user.id()).await.or_redirect("/")?;
    state
        .views
        .page(
            Page::RecipesIndex,
            "My recipes",
            Some(user.user()),
            &RecipeList { recipes: &recipes },
        )
        .or_redirect("/")
}

#[get("/recipes/new")]
pub async fn new_recipe_form(state: web::Data<HttpState>, user: CurrentUser) -> PageResult {
    let catalogue = state.ingredients.list().await.or_redirect(RECIPES_PATH)?;
    state
        .views
        .page(
            Page::RecipesNew,
            "New recipe",
            Some(user.user()),
            &RecipeForm {
                recipe: None,
                catalogue: &catalogue,
            },
        )
        .or_redirect(RECIPES_PATH)
}

/// Create a recipe owned by the signed-in user.
#[post("/recipes")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    user: CurrentUser,
    body: web::Bytes,
) -> PageResult {
    let draft = recipe_draft(&FormFields::from(body)).or_redirect("/")?;
    state
        .recipes
        .create(user.id(), draft)
        .await
        .or_redirect("/")?;
    Ok(see_other(RECIPES_PATH))
}

#[get("/recipes/{id}")]
pub async fn show_recipe(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
) -> PageResult {
    let id = parse_recipe_id(&path).or_redirect(RECIPES_PATH)?;
    let recipe = state
        .recipes_query
        .show(user.id(), &id)
        .await
        .or_redirect(RECIPES_PATH)?;
    state
        .views
        .page(
            Page::RecipesShow,
            &recipe.recipe.name,
            Some(user.user()),
            &RecipeDetail { recipe: &recipe },
        )
        .or_redirect(RECIPES_PATH)
}

#[get("/recipes/{id}/edit")]
pub async fn edit_recipe_form(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
) -> PageResult {
    let id = parse_recipe_id(&path).or_redirect(RECIPES_PATH)?;
    let form = state
        .recipes_query
        .edit_form(user.id(), &id)
        .await
        .or_redirect(RECIPES_PATH)?;
    state
        .views
        .page(
            Page::RecipesEdit,
            "Edit recipe",
            Some(user.user()),
            &RecipeForm {
                recipe: Some(&form.recipe),
                catalogue: &form.catalogue,
            },
        )
        .or_redirect(RECIPES_PATH)
}

/// Apply submitted fields to an owned recipe; the owner never changes.
#[route("/recipes/{id}", method = "PUT", method = "PATCH")]
pub async fn update_recipe(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
    body: web::Bytes,
) -> PageResult {
    let id = parse_recipe_id(&path).or_redirect(RECIPES_PATH)?;
    let draft = recipe_draft(&FormFields::from(body)).or_redirect(RECIPES_PATH)?;
    let updated = state
        .recipes
        .update(user.id(), &id, draft)
        .await
        .or_redirect(RECIPES_PATH)?;
    Ok(see_other(&format!("{RECIPES_PATH}/{}", updated.id)))
}

/// Delete an owned recipe. Deleting nothing still lands on the list.
#[delete("/recipes/{id}")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<String>,
) -> PageResult {
    let id = parse_recipe_id(&path).or_redirect(RECIPES_PATH)?;
    state
        .recipes
        .delete(user.id(), &id)
        .await
        .or_redirect(RECIPES_PATH)?;
    Ok(see_other(RECIPES_PATH))
}
