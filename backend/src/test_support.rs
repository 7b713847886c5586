//! In-memory adapters for the driven ports.
//!
//! Compiled for unit tests and, behind the `test-support` feature, for the
//! integration suites under `tests/`. The stores keep insertion order, which
//! stands in for the database's `created_at, id` ordering.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{
    IngredientRepository, IngredientRepositoryError, RecipeRepository, RecipeRepositoryError,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    Ingredient, IngredientCatalogService, IngredientId, NewIngredient, Recipe, RecipeId,
    RecipeService, User, UserAccount, UserAccountsService, UserId, Username,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::inbound::http::views::{ViewError, Views};

fn poisoned<T>(_: PoisonError<T>) -> String {
    "in-memory store lock poisoned".to_owned()
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, String> {
    mutex.lock().map_err(poisoned)
}

/// Account store keyed by insertion order; usernames are unique.
#[derive(Default)]
pub struct InMemoryUserRepository {
    accounts: Mutex<Vec<UserAccount>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut accounts = lock(&self.accounts).map_err(UserPersistenceError::query)?;
        let username = account.user.username();
        if accounts.iter().any(|a| a.user.username() == username) {
            return Err(UserPersistenceError::unique_violation(username.as_ref()));
        }
        accounts.push(account.clone());
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let accounts = lock(&self.accounts).map_err(UserPersistenceError::query)?;
        Ok(accounts
            .iter()
            .find(|a| a.user.username() == username)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let accounts = lock(&self.accounts).map_err(UserPersistenceError::query)?;
        Ok(accounts
            .iter()
            .find(|a| a.user.id() == id)
            .map(|a| a.user.clone()))
    }
}

/// Ingredient catalogue held in a vector.
#[derive(Default)]
pub struct InMemoryIngredientRepository {
    ingredients: Mutex<Vec<Ingredient>>,
}

impl InMemoryIngredientRepository {
    /// Insert a catalogue entry directly, bypassing the service.
    ///
    /// # Panics
    ///
    /// Panics when `name` fails ingredient validation.
    pub fn seed(&self, name: &str) -> Ingredient {
        let ingredient = NewIngredient::try_new(name, None)
            .unwrap_or_else(|err| panic!("invalid seed ingredient {name}: {err}"))
            .into_ingredient(IngredientId::random());
        self.ingredients
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ingredient.clone());
        ingredient
    }
}

#[async_trait]
impl IngredientRepository for InMemoryIngredientRepository {
    async fn list_all(&self) -> Result<Vec<Ingredient>, IngredientRepositoryError> {
        let ingredients = lock(&self.ingredients).map_err(IngredientRepositoryError::query)?;
        Ok(ingredients.clone())
    }

    async fn find_by_ids(
        &self,
        ids: &[IngredientId],
    ) -> Result<Vec<Ingredient>, IngredientRepositoryError> {
        let ingredients = lock(&self.ingredients).map_err(IngredientRepositoryError::query)?;
        Ok(ingredients
            .iter()
            .filter(|i| ids.contains(&i.id))
            .cloned()
            .collect())
    }

    async fn insert(&self, ingredient: &Ingredient) -> Result<(), IngredientRepositoryError> {
        let mut ingredients =
            lock(&self.ingredients).map_err(IngredientRepositoryError::query)?;
        ingredients.push(ingredient.clone());
        Ok(())
    }
}

/// Recipe store with the same owner-scoped writes as the Diesel adapter.
#[derive(Default)]
pub struct InMemoryRecipeRepository {
    recipes: Mutex<Vec<Recipe>>,
}

impl InMemoryRecipeRepository {
    /// Every stored recipe regardless of owner.
    pub fn snapshot(&self) -> Vec<Recipe> {
        self.recipes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Fetch a stored recipe regardless of owner.
    pub fn get(&self, id: &RecipeId) -> Option<Recipe> {
        self.snapshot().into_iter().find(|r| r.id == *id)
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let recipes = lock(&self.recipes).map_err(RecipeRepositoryError::query)?;
        Ok(recipes.iter().filter(|r| r.owner == *owner).cloned().collect())
    }

    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let recipes = lock(&self.recipes).map_err(RecipeRepositoryError::query)?;
        Ok(recipes.iter().find(|r| r.id == *id).cloned())
    }

    async fn insert(&self, recipe: &Recipe) -> Result<(), RecipeRepositoryError> {
        let mut recipes = lock(&self.recipes).map_err(RecipeRepositoryError::query)?;
        recipes.push(recipe.clone());
        Ok(())
    }

    async fn update_owned(&self, recipe: &Recipe) -> Result<bool, RecipeRepositoryError> {
        let mut recipes = lock(&self.recipes).map_err(RecipeRepositoryError::query)?;
        let Some(stored) = recipes
            .iter_mut()
            .find(|r| r.id == recipe.id && r.owner == recipe.owner)
        else {
            return Ok(false);
        };
        stored.name.clone_from(&recipe.name);
        stored.instructions.clone_from(&recipe.instructions);
        stored.ingredient_ids.clone_from(&recipe.ingredient_ids);
        Ok(true)
    }

    async fn delete_owned(
        &self,
        id: &RecipeId,
        owner: &UserId,
    ) -> Result<bool, RecipeRepositoryError> {
        let mut recipes = lock(&self.recipes).map_err(RecipeRepositoryError::query)?;
        let before = recipes.len();
        recipes.retain(|r| !(r.id == *id && r.owner == *owner));
        Ok(recipes.len() < before)
    }
}

/// The three in-memory stores, shared with the services built over them so
/// tests can seed and inspect state directly.
#[derive(Clone, Default)]
pub struct InMemoryStores {
    pub users: Arc<InMemoryUserRepository>,
    pub ingredients: Arc<InMemoryIngredientRepository>,
    pub recipes: Arc<InMemoryRecipeRepository>,
}

impl InMemoryStores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wire the real domain services over these stores.
    pub fn ports(&self) -> HttpStatePorts {
        let recipe_service = Arc::new(RecipeService::new(
            self.recipes.clone(),
            self.ingredients.clone(),
        ));
        HttpStatePorts {
            accounts: Arc::new(UserAccountsService::new(self.users.clone())),
            ingredients: Arc::new(IngredientCatalogService::new(self.ingredients.clone())),
            recipes: recipe_service.clone(),
            recipes_query: recipe_service,
        }
    }

    /// Handler state over these stores with freshly compiled views.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError`] when a template fails to compile.
    pub fn http_state(&self) -> Result<HttpState, ViewError> {
        Ok(HttpState::new(self.ports(), Arc::new(Views::new()?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecipeDraft;
    use rstest::rstest;

    fn recipe(owner: UserId) -> Recipe {
        RecipeDraft::try_new("Soup", "Boil", Vec::new())
            .expect("valid draft")
            .into_recipe(RecipeId::random(), owner)
    }

    #[rstest]
    #[tokio::test]
    async fn owner_scoped_writes_ignore_foreign_rows() {
        let repo = InMemoryRecipeRepository::default();
        let owner = UserId::random();
        let stored = recipe(owner);
        repo.insert(&stored).await.expect("insert");

        let mut hijack = stored.clone();
        hijack.owner = UserId::random();
        hijack.name = "Stolen".to_owned();

        assert!(!repo.update_owned(&hijack).await.expect("update"));
        assert!(
            !repo
                .delete_owned(&stored.id, &hijack.owner)
                .await
                .expect("delete")
        );
        assert_eq!(repo.get(&stored.id), Some(stored));
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_usernames_are_rejected() {
        let repo = InMemoryUserRepository::default();
        let hash = crate::domain::PasswordHash::from_phc("$argon2id$stub");
        let account = |id| UserAccount {
            user: User::new(id, Username::new("chef").expect("valid username")),
            password_hash: hash.clone(),
        };

        repo.insert(&account(UserId::random())).await.expect("first insert");
        let err = repo
            .insert(&account(UserId::random()))
            .await
            .expect_err("duplicate");

        assert_eq!(err, UserPersistenceError::unique_violation("chef"));
    }
}
