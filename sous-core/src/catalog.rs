//! Fixed selection lists offered to the user.

use crate::error::PreconditionError;
use crate::types::RecipeRequest;

pub const INGREDIENTS: &[&str] = &[
    "Eggs",
    "Potato",
    "Tomato",
    "Rice",
    "Milk",
    "Flour",
    "Onion",
    "Garlic",
    "Carrot",
    "Spinach",
    "Paneer",
    "Chicken",
    "Fish",
    "Mushroom",
    "Beans",
    "Broccoli",
    "Capsicum",
    "Cabbage",
    "Cheese",
    "Corn",
    "Lentils",
    "Tofu",
    "Peas",
    "Beetroot",
    "Pumpkin",
    "Cauliflower",
    "Bread",
    "Yogurt",
    "Coconut",
    "Butter",
    "Chili",
    "Cucumber",
    "Sweet Potato",
    "Zucchini",
    "Bell Pepper",
    "Mint",
    "Basil",
    "Lemon",
    "Ginger",
];

pub const CATEGORIES: &[&str] = &[
    "Breakfast",
    "Meals",
    "Snacks",
    "Dessert",
    "Appetizers",
    "Soups & Stews",
    "Salads",
    "Sauces & Dips",
    "Smoothies & Juices",
    "Side Dishes",
    "Main Course",
    "Vegetarian",
    "Vegan",
    "Gluten-Free",
    "Low-Carb",
    "Keto",
    "High-Protein",
    "Pasta",
    "Pizza",
    "Bread & Baked Goods",
    "Sweets & Treats",
    "Drinks",
    "Crockpot/Slow Cooker",
    "Instant Pot",
    "Grilled",
    "Stir-fry",
    "One-Pot Meals",
    "Fermented Foods",
    "Healthy Snacks",
];

pub const ACTIONS: &[&str] = &[
    "boil",
    "fry",
    "bake",
    "grill",
    "mix",
    "sauté",
    "steam",
    "roast",
    "blanch",
    "stir-fry",
    "slow-cook",
    "poach",
    "simmer",
    "braise",
    "broil",
    "deep-fry",
    "pan-fry",
    "barbecue",
    "marinate",
    "grate",
    "chop",
    "mash",
    "whisk",
    "glaze",
    "grind",
    "caramelize",
    "zest",
    "fold",
    "shred",
    "press",
    "crush",
    "toast",
    "microwave",
    "blend",
    "stir",
    "tenderize",
    "freeze",
    "thaw",
];

/// Find `value` in `list` ignoring case, returning the catalog spelling.
fn canonical(list: &'static [&'static str], value: &str) -> Option<&'static str> {
    let wanted = value.trim().to_lowercase();
    list.iter().copied().find(|entry| entry.to_lowercase() == wanted)
}

/// Check a raw selection against the catalog.
///
/// Values are matched case-insensitively and replaced by their catalog
/// spelling. Repeated ingredients are dropped, keeping the first selection's
/// position. An empty ingredient list is accepted here; the flow rejects it.
pub fn validate_selection(
    ingredients: &[String],
    category: &str,
    action: &str,
) -> Result<RecipeRequest, PreconditionError> {
    let mut selected: Vec<String> = Vec::with_capacity(ingredients.len());
    for ingredient in ingredients {
        let name = canonical(INGREDIENTS, ingredient)
            .ok_or_else(|| PreconditionError::UnknownIngredient(ingredient.clone()))?;
        if !selected.iter().any(|s| s == name) {
            selected.push(name.to_string());
        }
    }

    let category = canonical(CATEGORIES, category)
        .ok_or_else(|| PreconditionError::UnknownCategory(category.to_string()))?;
    let action = canonical(ACTIONS, action)
        .ok_or_else(|| PreconditionError::UnknownAction(action.to_string()))?;

    Ok(RecipeRequest::new(selected, category, action))
}
