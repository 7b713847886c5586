//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations/` exactly. When a
//! migration changes a table, update this file (or regenerate it with
//! `diesel print-schema`).

diesel::table! {
    /// Registered accounts. `username` is unique.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Shared ingredient catalogue, readable by every signed-in user.
    ingredients (id) {
        id -> Uuid,
        name -> Varchar,
        category -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recipes, each owned by exactly one user.
    recipes (id) {
        id -> Uuid,
        owner_id -> Uuid,
        name -> Varchar,
        instructions -> Text,
        /// Unresolved catalogue references; duplicates allowed.
        ingredient_ids -> Array<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(recipes -> users (owner_id));

diesel::allow_tables_to_appear_in_same_query!(ingredients, recipes, users);
