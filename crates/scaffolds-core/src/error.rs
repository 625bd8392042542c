use thiserror::Error;

/// Errors surfaced when a render request is rejected.
///
/// The [`crate::Scaffold`] operations themselves never fail; these come from
/// [`crate::render_plan`], which selects a variant and validates its inputs
/// before rendering.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScaffoldError {
    #[error("unknown scaffold {name:?} (available: {available})")]
    UnknownScaffold { name: String, available: String },

    #[error("unsupported model {model:?} (supported: {supported})")]
    InvalidModel { model: String, supported: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}
