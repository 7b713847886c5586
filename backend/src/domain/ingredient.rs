//! Shared ingredient catalogue entries.
//!
//! Ingredients are not owned by any user. They are created through catalogue
//! submissions and never updated or deleted.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// Maximum length for an ingredient name or category.
pub const INGREDIENT_TEXT_MAX: usize = 64;

/// Validation errors for ingredient input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IngredientValidationError {
    #[error("ingredient id must be a valid UUID")]
    InvalidId,
    #[error("ingredient name must not be empty")]
    EmptyName,
    #[error("ingredient name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("ingredient category must be at most {max} characters")]
    CategoryTooLong { max: usize },
}

/// Ingredient identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct IngredientId(Uuid);

impl IngredientId {
    /// Parse an identifier submitted by a client.
    pub fn new(id: impl AsRef<str>) -> Result<Self, IngredientValidationError> {
        Uuid::parse_str(id.as_ref().trim())
            .map(Self)
            .map_err(|_| IngredientValidationError::InvalidId)
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

impl fmt::Display for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<IngredientId> for String {
    fn from(value: IngredientId) -> Self {
        value.0.to_string()
    }
}

/// Validated ingredient submission.
///
/// ## Invariants
/// - `name` is trimmed, non-empty and at most [`INGREDIENT_TEXT_MAX`] chars.
/// - `category` is trimmed; a blank category is stored as absent.
///
/// # Examples
/// ```
/// use recipe_backend::domain::NewIngredient;
///
/// let draft = NewIngredient::try_new(" Basil ", Some("  ")).unwrap();
/// assert_eq!(draft.name(), "Basil");
/// assert_eq!(draft.category(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIngredient {
    name: String,
    category: Option<String>,
}

impl NewIngredient {
    /// Validate raw form values.
    pub fn try_new(name: &str, category: Option<&str>) -> Result<Self, IngredientValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(IngredientValidationError::EmptyName);
        }
        if name.chars().count() > INGREDIENT_TEXT_MAX {
            return Err(IngredientValidationError::NameTooLong {
                max: INGREDIENT_TEXT_MAX,
            });
        }

        let category = category.map(str::trim).filter(|value| !value.is_empty());
        if category.is_some_and(|value| value.chars().count() > INGREDIENT_TEXT_MAX) {
            return Err(IngredientValidationError::CategoryTooLong {
                max: INGREDIENT_TEXT_MAX,
            });
        }

        Ok(Self {
            name: name.to_owned(),
            category: category.map(str::to_owned),
        })
    }

    /// Ingredient name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Optional category attribute.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Attach an identifier, producing a catalogue record.
    pub fn into_ingredient(self, id: IngredientId) -> Ingredient {
        Ingredient {
            id,
            name: self.name,
            category: self.category,
        }
    }
}

/// Catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}
