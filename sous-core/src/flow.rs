//! Cache-or-generate orchestration.
//!
//! One run per user request: check the store, and on a miss generate the
//! recipe and append it to the store. Nothing is retried.

use crate::error::{FlowError, PreconditionError};
use crate::llm::{GenerationError, RecipeGenerator};
use crate::store::RecipeStore;
use crate::types::{RecipeOutcome, RecipeRequest, RecipeSource};

/// Look up the recipe for `request`, generating and caching it on a miss.
///
/// - No ingredients: `FlowError::Precondition`, with no store or generator call.
/// - Store lookup failure: `FlowError::Store`.
/// - Generator unreachable or unparseable answer: `FlowError::Generator`.
/// - Generator non-success status: the error report becomes the outcome text
///   and is not stored.
/// - Insert failure after a successful generation: logged, and the generated
///   text is still returned.
pub async fn lookup_or_generate(
    store: &dyn RecipeStore,
    generator: &dyn RecipeGenerator,
    request: &RecipeRequest,
) -> Result<RecipeOutcome, FlowError> {
    if request.ingredients.is_empty() {
        return Err(PreconditionError::NoIngredients.into());
    }

    let key = request.cache_key();

    if let Some(steps) = store.find(&key)? {
        tracing::debug!(
            ingredients = %key.ingredients,
            action = %key.action,
            "Recipe cache hit"
        );
        return Ok(RecipeOutcome {
            text: steps,
            source: RecipeSource::Cache,
        });
    }

    tracing::debug!(
        ingredients = %key.ingredients,
        action = %key.action,
        provider = generator.provider_name(),
        model = generator.model_name(),
        "Recipe cache miss, calling generator"
    );

    let generated = generator
        .generate(&request.ingredients, &request.action, &request.category)
        .await;

    let steps = match generated {
        Ok(steps) => steps,
        Err(GenerationError::ApiError { status, body }) => {
            tracing::warn!(
                status = status,
                provider = generator.provider_name(),
                "Generator returned an error response"
            );
            return Ok(RecipeOutcome {
                text: format!(
                    "Error from {} API: {} - {}",
                    generator.display_name(),
                    status,
                    body
                ),
                source: RecipeSource::GeneratorError { status },
            });
        }
        Err(e) => return Err(FlowError::Generator(e)),
    };

    let persisted = persist(store, request, &steps);

    Ok(RecipeOutcome {
        text: steps,
        source: RecipeSource::Generated { persisted },
    })
}

/// Append freshly generated steps. Returns whether a record was written.
fn persist(store: &dyn RecipeStore, request: &RecipeRequest, steps: &str) -> bool {
    if steps.is_empty() {
        tracing::debug!("Generator returned no text, not caching");
        return false;
    }

    match store.insert(&request.to_new_record(steps)) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to cache generated recipe");
            false
        }
    }
}
