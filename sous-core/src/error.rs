use thiserror::Error;

use crate::llm::GenerationError;
use crate::store::StoreError;

/// A selection that must be fixed by the user before anything is looked up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("Please select at least one ingredient.")]
    NoIngredients,

    #[error("Unknown ingredient: {0}")]
    UnknownIngredient(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),
}

/// Failure of a lookup-or-generate run that leaves nothing to display.
///
/// A non-success answer from the generation endpoint is not a `FlowError`:
/// it is reported as the recipe text (see [`crate::RecipeSource::GeneratorError`]).
#[derive(Error, Debug)]
pub enum FlowError {
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error("Recipe store unavailable: {0}")]
    Store(#[from] StoreError),

    #[error("Recipe generator unavailable: {0}")]
    Generator(GenerationError),
}
