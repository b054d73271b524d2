use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, PooledConnection};
use diesel::sql_types::Text;
use sous_core::{CacheKey, NewRecipeRecord, RecipeStore, StoreError};

use crate::models::NewRecipe;
use crate::raw_sql;
use crate::schema::recipes;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

type DbConnection = PooledConnection<ConnectionManager<PgConnection>>;

diesel::define_sql_function! {
    /// SQL `LOWER(text)`.
    fn lower(x: Text) -> Text;
}

/// Open the connection pool. Fails if no connection can be established.
pub fn create_pool(database_url: &str) -> Result<DbPool, r2d2::PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    r2d2::Pool::builder().build(manager)
}

/// [`RecipeStore`] over the `recipes` table in PostgreSQL.
pub struct PgRecipeStore {
    pool: DbPool,
}

impl PgRecipeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<DbConnection, StoreError> {
        self.pool
            .get()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

/// Steps of the oldest row matching `key`, compared case-insensitively.
fn find_query(key: &CacheKey) -> recipes::BoxedQuery<'_, Pg, Text> {
    recipes::table
        .filter(lower(recipes::ingredient).eq(&key.ingredients))
        .filter(lower(recipes::action).eq(&key.action))
        .order(recipes::id.asc())
        .select(recipes::steps)
        .limit(1)
        .into_boxed()
}

fn new_recipe(record: &NewRecipeRecord) -> NewRecipe<'_> {
    NewRecipe {
        category: &record.category,
        ingredient: &record.ingredients,
        action: &record.action,
        steps: &record.steps,
    }
}

fn query_error(e: diesel::result::Error) -> StoreError {
    StoreError::Query(e.to_string())
}

impl RecipeStore for PgRecipeStore {
    fn ensure_schema(&self) -> Result<(), StoreError> {
        let mut conn = self.conn()?;
        diesel::sql_query(raw_sql::CREATE_RECIPES_TABLE)
            .execute(&mut conn)
            .map_err(query_error)?;
        Ok(())
    }

    fn find(&self, key: &CacheKey) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn()?;

        let _span = tracing::debug_span!("db.query", table = "recipes", op = "find").entered();
        find_query(key)
            .get_result::<String>(&mut conn)
            .optional()
            .map_err(query_error)
    }

    fn insert(&self, record: &NewRecipeRecord) -> Result<(), StoreError> {
        let mut conn = self.conn()?;

        let _span = tracing::debug_span!("db.query", table = "recipes", op = "insert").entered();
        diesel::insert_into(recipes::table)
            .values(new_recipe(record))
            .execute(&mut conn)
            .map_err(query_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sous_core::RecipeRequest;

    fn eggs_and_potato() -> RecipeRequest {
        RecipeRequest::new(
            vec!["Eggs".to_string(), "Potato".to_string()],
            "Breakfast",
            "Fry",
        )
    }

    /// Split `debug_query` output into the SQL text and the bind list.
    fn sql_and_binds(rendered: String) -> (String, String) {
        match rendered.split_once(" -- binds: ") {
            Some((sql, binds)) => (sql.to_string(), binds.to_string()),
            None => (rendered, String::new()),
        }
    }

    #[test]
    fn test_find_query_lowercases_both_columns_with_bound_values() {
        let key = eggs_and_potato().cache_key();
        let (sql, binds) =
            sql_and_binds(diesel::debug_query::<Pg, _>(&find_query(&key)).to_string());

        assert!(sql.contains(r#"lower("recipes"."ingredient") = $1"#), "{sql}");
        assert!(sql.contains(r#"lower("recipes"."action") = $2"#), "{sql}");
        assert!(!sql.contains("eggs"), "{sql}");
        assert!(!sql.contains("fry"), "{sql}");
        assert!(binds.contains(r#""eggs, potato""#), "{binds}");
        assert!(binds.contains(r#""fry""#), "{binds}");
    }

    #[test]
    fn test_find_query_returns_oldest_row_only() {
        let key = eggs_and_potato().cache_key();
        let (sql, _) = sql_and_binds(diesel::debug_query::<Pg, _>(&find_query(&key)).to_string());

        assert!(sql.starts_with(r#"SELECT "recipes"."steps" FROM "recipes""#), "{sql}");
        assert!(sql.contains(r#"ORDER BY "recipes"."id" ASC LIMIT"#), "{sql}");
    }

    #[test]
    fn test_insert_binds_display_values() {
        let record = eggs_and_potato().to_new_record("Step 1: it's done");
        let insert = diesel::insert_into(recipes::table).values(new_recipe(&record));
        let (sql, binds) = sql_and_binds(diesel::debug_query::<Pg, _>(&insert).to_string());

        assert!(sql.starts_with(r#"INSERT INTO "recipes""#), "{sql}");
        assert!(sql.contains("$4"), "{sql}");
        assert!(!sql.contains("it's done"), "{sql}");
        assert!(binds.contains(r#""Eggs, Potato""#), "{binds}");
        assert!(binds.contains(r#""Fry""#), "{binds}");
    }
}
