//! Server-rendered HTML pages.
//!
//! Templates live in `backend/templates` and are compiled into the binary.
//! Every page receives the signed-in user (or `null`) under `user` so the
//! shared header can render sign-in state.

use actix_web::HttpResponse;
use actix_web::http::header::ContentType;
use handlebars::Handlebars;
use serde::Serialize;

use crate::domain::{Error, User};

/// Pages known to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    SignUp,
    SignIn,
    RecipesIndex,
    RecipesNew,
    RecipesShow,
    RecipesEdit,
    IngredientsIndex,
}

impl Page {
    const ALL: [Page; 8] = [
        Page::Home,
        Page::SignUp,
        Page::SignIn,
        Page::RecipesIndex,
        Page::RecipesNew,
        Page::RecipesShow,
        Page::RecipesEdit,
        Page::IngredientsIndex,
    ];

    /// Registered template name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::SignUp => "auth/sign-up",
            Self::SignIn => "auth/sign-in",
            Self::RecipesIndex => "recipes/index",
            Self::RecipesNew => "recipes/new",
            Self::RecipesShow => "recipes/show",
            Self::RecipesEdit => "recipes/edit",
            Self::IngredientsIndex => "ingredients/index",
        }
    }

    fn source(self) -> &'static str {
        match self {
            Self::Home => include_str!("../../../templates/home.hbs"),
            Self::SignUp => include_str!("../../../templates/sign_up.hbs"),
            Self::SignIn => include_str!("../../../templates/sign_in.hbs"),
            Self::RecipesIndex => include_str!("../../../templates/recipes_index.hbs"),
            Self::RecipesNew => include_str!("../../../templates/recipes_new.hbs"),
            Self::RecipesShow => include_str!("../../../templates/recipes_show.hbs"),
            Self::RecipesEdit => include_str!("../../../templates/recipes_edit.hbs"),
            Self::IngredientsIndex => include_str!("../../../templates/ingredients_index.hbs"),
        }
    }
}

const PARTIALS: [(&str, &str); 2] = [
    ("header", include_str!("../../../templates/partials/header.hbs")),
    ("footer", include_str!("../../../templates/partials/footer.hbs")),
];

/// Failure to compile the embedded templates at startup.
#[derive(Debug, thiserror::Error)]
#[error("failed to register template {name}: {message}")]
pub struct ViewError {
    name: &'static str,
    message: String,
}

#[derive(Serialize)]
struct PageContext<'a, T: Serialize> {
    title: &'a str,
    user: Option<&'a User>,
    #[serde(flatten)]
    data: &'a T,
}

/// Compiled template registry.
pub struct Views {
    handlebars: Handlebars<'static>,
}

impl Views {
    /// Compile every page and partial.
    pub fn new() -> Result<Self, ViewError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);

        for (name, source) in PARTIALS {
            handlebars
                .register_partial(name, source)
                .map_err(|error| ViewError {
                    name,
                    message: error.to_string(),
                })?;
        }
        for page in Page::ALL {
            handlebars
                .register_template_string(page.name(), page.source())
                .map_err(|error| ViewError {
                    name: page.name(),
                    message: error.to_string(),
                })?;
        }
        Ok(Self { handlebars })
    }

    /// Render `page` to an HTML string.
    pub fn render<T: Serialize>(
        &self,
        page: Page,
        title: &str,
        user: Option<&User>,
        data: &T,
    ) -> Result<String, Error> {
        let context = PageContext { title, user, data };
        self.handlebars
            .render(page.name(), &context)
            .map_err(|error| Error::internal(format!("failed to render {}: {error}", page.name())))
    }

    /// Render `page` into a `200 OK` HTML response.
    pub fn page<T: Serialize>(
        &self,
        page: Page,
        title: &str,
        user: Option<&User>,
        data: &T,
    ) -> Result<HttpResponse, Error> {
        let body = self.render(page, title, user, data)?;
        Ok(HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(body))
    }
}
