//! Request, record and outcome types shared by the store, generator and flow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Separator for joined ingredient lists, in both the cache key and the stored column.
pub const INGREDIENT_SEPARATOR: &str = ", ";

/// A user's selection, in display form (catalog spelling, selection order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRequest {
    pub ingredients: Vec<String>,
    pub category: String,
    pub action: String,
}

impl RecipeRequest {
    pub fn new(
        ingredients: Vec<String>,
        category: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            ingredients,
            category: category.into(),
            action: action.into(),
        }
    }

    /// Ingredients joined in selection order, e.g. "Eggs, Potato".
    pub fn ingredients_display(&self) -> String {
        self.ingredients.join(INGREDIENT_SEPARATOR)
    }

    /// Normalized lookup key.
    ///
    /// Selection order is kept: "Eggs, Potato" and "Potato, Eggs" are
    /// different keys.
    pub fn cache_key(&self) -> CacheKey {
        let ingredients = self
            .ingredients
            .iter()
            .map(|i| i.to_lowercase())
            .collect::<Vec<_>>()
            .join(INGREDIENT_SEPARATOR);

        CacheKey {
            ingredients,
            action: self.action.to_lowercase(),
        }
    }

    /// Title shown above the recipe text.
    pub fn heading(&self) -> String {
        format!(
            "Recipe Steps for {} ({})",
            self.ingredients_display(),
            self.action
        )
    }

    /// Record to append once `steps` has been generated for this request.
    pub fn to_new_record(&self, steps: impl Into<String>) -> NewRecipeRecord {
        NewRecipeRecord {
            category: self.category.clone(),
            ingredients: self.ingredients_display(),
            action: self.action.clone(),
            steps: steps.into(),
        }
    }
}

/// Normalized (ingredients, action) pair. Both fields are lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub ingredients: String,
    pub action: String,
}

/// A recipe about to be appended to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipeRecord {
    pub category: String,
    /// Display values joined with [`INGREDIENT_SEPARATOR`].
    pub ingredients: String,
    pub action: String,
    pub steps: String,
}

/// A stored recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeRecord {
    pub id: i32,
    pub category: String,
    pub ingredients: String,
    pub action: String,
    pub steps: String,
    pub created_at: DateTime<Utc>,
}

/// Where the text of a [`RecipeOutcome`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecipeSource {
    Cache,
    Generated { persisted: bool },
    /// The generation endpoint answered with a non-success status; the text
    /// is the error report.
    GeneratorError { status: u16 },
}

/// Text to display for a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeOutcome {
    pub text: String,
    pub source: RecipeSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(ingredients: &[&str], action: &str) -> RecipeRequest {
        RecipeRequest::new(
            ingredients.iter().map(|s| s.to_string()).collect(),
            "Breakfast",
            action,
        )
    }

    #[test]
    fn test_cache_key_is_lowercase() {
        let key = request(&["Eggs", "Sweet Potato"], "Stir-Fry").cache_key();
        assert_eq!(key.ingredients, "eggs, sweet potato");
        assert_eq!(key.action, "stir-fry");
    }

    #[test]
    fn test_cache_key_keeps_selection_order() {
        let a = request(&["Eggs", "Potato"], "fry").cache_key();
        let b = request(&["Potato", "Eggs"], "fry").cache_key();
        assert_ne!(a, b);
    }

    #[test]
    fn test_heading() {
        let req = request(&["Eggs", "Potato"], "fry");
        assert_eq!(req.heading(), "Recipe Steps for Eggs, Potato (fry)");
    }

    #[test]
    fn test_new_record_uses_display_values() {
        let record = request(&["Eggs", "Potato"], "fry").to_new_record("Step 1...");
        assert_eq!(record.ingredients, "Eggs, Potato");
        assert_eq!(record.action, "fry");
        assert_eq!(record.category, "Breakfast");
        assert_eq!(record.steps, "Step 1...");
    }

    #[test]
    fn test_source_serialization() {
        let json = serde_json::to_value(RecipeSource::Generated { persisted: false }).unwrap();
        assert_eq!(json["kind"], "generated");
        assert_eq!(json["persisted"], false);

        let json = serde_json::to_value(RecipeSource::GeneratorError { status: 503 }).unwrap();
        assert_eq!(json["kind"], "generator_error");
        assert_eq!(json["status"], 503);
    }
}
