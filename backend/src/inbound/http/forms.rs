//! URL-encoded form parsing for page handlers.
//!
//! Bodies are decoded by hand rather than through `web::Form` because recipe
//! forms repeat the `ingredients` key once per selected ingredient and a
//! malformed submission must end in a redirect, not a bare `400`.

use actix_web::web::Bytes;

use crate::domain::{
    Credentials, Error, IngredientId, NewIngredient, RecipeDraft,
};

const INGREDIENTS_KEY: &str = "ingredients";
const INGREDIENTS_ARRAY_KEY: &str = "ingredients[]";

/// Decoded `application/x-www-form-urlencoded` body.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    /// Decode a raw request body.
    ///
    /// # Examples
    /// ```
    /// use recipe_backend::inbound::http::forms::FormFields;
    ///
    /// let fields = FormFields::parse(b"name=Soup&ingredients=a&ingredients=b");
    /// assert_eq!(fields.first("name"), Some("Soup"));
    /// assert_eq!(fields.all("ingredients").count(), 2);
    /// ```
    pub fn parse(body: &[u8]) -> Self {
        Self(
            url::form_urlencoded::parse(body)
                .map(|(key, value)| (key.into_owned(), value.into_owned()))
                .collect(),
        )
    }

    /// First value submitted under `key`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Every value submitted under `key`, in submission order.
    pub fn all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    fn text(&self, key: &str) -> &str {
        self.first(key).unwrap_or_default()
    }
}

impl From<Bytes> for FormFields {
    fn from(body: Bytes) -> Self {
        Self::parse(&body)
    }
}

fn invalid(field: &str, error: impl std::fmt::Display) -> Error {
    Error::invalid_request(error.to_string())
        .with_details(serde_json::json!({ "field": field }))
}

/// Build a recipe draft from a submitted recipe form.
///
/// Only `name`, `instructions` and `ingredients` are read; any `owner` field
/// in the body is ignored. Blank ingredient entries are skipped.
pub fn recipe_draft(fields: &FormFields) -> Result<RecipeDraft, Error> {
    let ingredient_ids = fields
        .all(INGREDIENTS_KEY)
        .chain(fields.all(INGREDIENTS_ARRAY_KEY))
        .filter(|raw| !raw.trim().is_empty())
        .map(IngredientId::new)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|error| invalid(INGREDIENTS_KEY, error))?;

    RecipeDraft::try_new(
        fields.text("name"),
        fields.text("instructions"),
        ingredient_ids,
    )
    .map_err(|error| invalid("recipe", error))
}

/// Build a catalogue submission from the ingredient form.
pub fn new_ingredient(fields: &FormFields) -> Result<NewIngredient, Error> {
    NewIngredient::try_new(fields.text("name"), fields.first("category"))
        .map_err(|error| invalid("ingredient", error))
}

/// Credentials from the sign-in form.
pub fn sign_in_credentials(fields: &FormFields) -> Result<Credentials, Error> {
    Credentials::try_from_parts(fields.text("username"), fields.text("password"))
        .map_err(|error| invalid("credentials", error))
}

/// Credentials from the sign-up form, with confirmation enforced.
pub fn sign_up_credentials(fields: &FormFields) -> Result<Credentials, Error> {
    Credentials::try_for_sign_up(
        fields.text("username"),
        fields.text("password"),
        fields.text("confirm_password"),
    )
    .map_err(|error| invalid("credentials", error))
}
