//! Recipe prompt template.

use crate::types::INGREDIENT_SEPARATOR;

/// Render the recipe prompt for the given display values.
pub fn render_recipe_prompt(ingredients: &[String], action: &str, category: &str) -> String {
    let ingredients_list = ingredients.join(INGREDIENT_SEPARATOR);

    format!(
        "You are a professional chef. Write a detailed, step-by-step cooking recipe for a {category} dish \
that uses the following ingredients: {ingredients_list}. The dish must involve the action: '{action}'.

Include:
- A title for the recipe
- An ingredients list
- Cooking time
- Number of servings
- Step-by-step instructions (at least 5 steps, numbered)
- Serve suggestion
Make sure each step includes specific actions, ingredients, and any temperatures or durations.

Here is the recipe:
",
        category = category,
        ingredients_list = ingredients_list,
        action = action,
    )
}

/// Remove the prompt the endpoint echoes in front of its completion.
///
/// Text that does not start with the prompt is returned unchanged.
pub fn strip_prompt_echo<'a>(generated: &'a str, prompt: &str) -> &'a str {
    generated.strip_prefix(prompt).unwrap_or(generated)
}
