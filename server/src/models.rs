use diesel::prelude::*;

/// Row appended on a cache miss. `id` and `created_at` come from column defaults.
#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub category: &'a str,
    /// Display values joined with ", ", e.g. "Eggs, Potato".
    pub ingredient: &'a str,
    pub action: &'a str,
    pub steps: &'a str,
}
