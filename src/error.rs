// error.rs
use thiserror::Error;

/// Failure modes of the recipe-generation call. All of them are recoverable:
/// the user retries the trigger and nothing else in the app has changed.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("could not reach recipe service: {0}")]
    Unreachable(String),

    #[error("recipe service returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("recipe service sent a malformed response: {0}")]
    Malformed(String),
}

/// Outcome of a recipe-workflow trigger that did not produce a recipe.
/// `Busy` is a silent no-op (the control is disabled during that span);
/// the other variants are surfaced to the caller.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("a recipe request is already in flight")]
    Busy,

    #[error("add at least 3 ingredients to get a recipe")]
    NotEnoughIngredients,

    #[error("{0}")]
    Service(#[from] ServiceError),
}
