//! Recipe aggregate and the ownership predicate.
//!
//! A recipe has exactly one owner, fixed at creation. Every read or write
//! other than create is gated by [`belongs_to`]; callers cannot tell a
//! missing recipe from one owned by somebody else.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use super::{Ingredient, IngredientId, UserId};

/// Maximum length for a recipe name.
pub const RECIPE_NAME_MAX: usize = 120;
/// Maximum length for recipe instructions.
pub const INSTRUCTIONS_MAX: usize = 10_000;

/// Validation errors for recipe input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeValidationError {
    #[error("recipe id must be a valid UUID")]
    InvalidId,
    #[error("recipe name must not be empty")]
    EmptyName,
    #[error("recipe name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("instructions must be at most {max} characters")]
    InstructionsTooLong { max: usize },
}

/// Recipe identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct RecipeId(Uuid);

impl RecipeId {
    /// Parse an identifier taken from a request path.
    pub fn new(id: impl AsRef<str>) -> Result<Self, RecipeValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| RecipeValidationError::InvalidId)
    }

    /// Wrap a UUID read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<RecipeId> for String {
    fn from(value: RecipeId) -> Self {
        value.0.to_string()
    }
}

/// Validated recipe fields submitted by a client.
///
/// There is deliberately no owner here: the owner comes from the
/// authenticated session and is passed separately to the store.
///
/// # Examples
/// ```
/// use recipe_backend::domain::RecipeDraft;
///
/// let draft = RecipeDraft::try_new(" Soup ", "Boil", Vec::new()).unwrap();
/// assert_eq!(draft.name(), "Soup");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    name: String,
    instructions: String,
    ingredient_ids: Vec<IngredientId>,
}

impl RecipeDraft {
    /// Validate raw form values.
    pub fn try_new(
        name: &str,
        instructions: &str,
        ingredient_ids: Vec<IngredientId>,
    ) -> Result<Self, RecipeValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RecipeValidationError::EmptyName);
        }
        if name.chars().count() > RECIPE_NAME_MAX {
            return Err(RecipeValidationError::NameTooLong {
                max: RECIPE_NAME_MAX,
            });
        }
        if instructions.chars().count() > INSTRUCTIONS_MAX {
            return Err(RecipeValidationError::InstructionsTooLong {
                max: INSTRUCTIONS_MAX,
            });
        }

        Ok(Self {
            name: name.to_owned(),
            instructions: instructions.to_owned(),
            ingredient_ids,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn instructions(&self) -> &str {
        self.instructions.as_str()
    }

    pub fn ingredient_ids(&self) -> &[IngredientId] {
        &self.ingredient_ids
    }

    /// Materialise a stored recipe for `owner`.
    pub fn into_recipe(self, id: RecipeId, owner: UserId) -> Recipe {
        Recipe {
            id,
            owner,
            name: self.name,
            instructions: self.instructions,
            ingredient_ids: self.ingredient_ids,
        }
    }
}

/// Stored recipe with ingredient references left unresolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub owner: UserId,
    pub name: String,
    pub instructions: String,
    pub ingredient_ids: Vec<IngredientId>,
}

impl Recipe {
    /// Copy the editable fields from `draft`; `id` and `owner` are untouched.
    pub fn apply(&mut self, draft: RecipeDraft) {
        self.name = draft.name;
        self.instructions = draft.instructions;
        self.ingredient_ids = draft.ingredient_ids;
    }
}

/// Recipe with its ingredient references resolved to catalogue records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopulatedRecipe {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub ingredients: Vec<Ingredient>,
}

/// The single ownership predicate shared by every gated recipe operation.
///
/// # Examples
/// ```
/// use recipe_backend::domain::{belongs_to, RecipeDraft, RecipeId, UserId};
///
/// let owner = UserId::random();
/// let recipe = RecipeDraft::try_new("Soup", "Boil", vec![])
///     .unwrap()
///     .into_recipe(RecipeId::random(), owner);
/// assert!(belongs_to(&recipe, &owner));
/// assert!(!belongs_to(&recipe, &UserId::random()));
/// ```
pub fn belongs_to(recipe: &Recipe, user: &UserId) -> bool {
    recipe.owner == *user
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", RecipeValidationError::EmptyName)]
    #[case("  \t ", RecipeValidationError::EmptyName)]
    fn rejects_blank_names(#[case] name: &str, #[case] expected: RecipeValidationError) {
        assert_eq!(
            RecipeDraft::try_new(name, "", Vec::new()).expect_err("blank"),
            expected
        );
    }

    #[rstest]
    fn rejects_overlong_fields() {
        let name = "n".repeat(RECIPE_NAME_MAX + 1);
        assert_eq!(
            RecipeDraft::try_new(&name, "", Vec::new()).expect_err("long name"),
            RecipeValidationError::NameTooLong {
                max: RECIPE_NAME_MAX
            }
        );
        let instructions = "i".repeat(INSTRUCTIONS_MAX + 1);
        assert_eq!(
            RecipeDraft::try_new("Soup", &instructions, Vec::new()).expect_err("long text"),
            RecipeValidationError::InstructionsTooLong {
                max: INSTRUCTIONS_MAX
            }
        );
    }

    #[rstest]
    fn empty_instructions_are_allowed() {
        let draft = RecipeDraft::try_new("Toast", "", Vec::new()).expect("valid");
        assert_eq!(draft.instructions(), "");
    }

    #[rstest]
    fn apply_keeps_identity_and_owner() {
        let owner = UserId::random();
        let id = RecipeId::random();
        let mut recipe = RecipeDraft::try_new("Soup", "Boil", Vec::new())
            .expect("valid")
            .into_recipe(id, owner);
        let basil = IngredientId::random();

        recipe.apply(RecipeDraft::try_new("Stew", "Simmer", vec![basil, basil]).expect("valid"));

        assert_eq!(recipe.id, id);
        assert_eq!(recipe.owner, owner);
        assert_eq!(recipe.name, "Stew");
        assert_eq!(recipe.ingredient_ids, vec![basil, basil]);
    }

    #[rstest]
    fn populated_recipe_flattens_fields() {
        let recipe = RecipeDraft::try_new("Soup", "Boil", Vec::new())
            .expect("valid")
            .into_recipe(RecipeId::random(), UserId::random());
        let value = serde_json::to_value(PopulatedRecipe {
            recipe,
            ingredients: Vec::new(),
        })
        .expect("serialises");
        assert_eq!(value["name"], "Soup");
        assert!(value["ingredients"].as_array().is_some_and(Vec::is_empty));
    }

    #[rstest]
    fn rejects_malformed_id() {
        assert_eq!(
            RecipeId::new("42").expect_err("malformed"),
            RecipeValidationError::InvalidId
        );
    }
}
