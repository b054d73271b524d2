//! Raw SQL that can't be expressed in Diesel's type-safe DSL.
//!
//! # Safety
//!
//! All SQL in this module is static. User input never reaches it; queries
//! that take user values go through the DSL with bound parameters (see
//! `db::PgRecipeStore`).

/// Create the recipe cache table if it is missing.
///
/// Diesel has no DSL for DDL. `IF NOT EXISTS` makes this safe to run on
/// every startup. Keep in sync with `schema.rs`.
///
/// # Safety
/// Static SQL string with no user input.
pub const CREATE_RECIPES_TABLE: &str = "CREATE TABLE IF NOT EXISTS recipes (\
    id SERIAL PRIMARY KEY, \
    category VARCHAR(100) NOT NULL, \
    ingredient VARCHAR(500) NOT NULL, \
    action VARCHAR(100) NOT NULL, \
    steps TEXT NOT NULL, \
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()\
    )";
