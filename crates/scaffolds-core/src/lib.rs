//! Rendering adapters for AI coding-assistant CLIs.
//!
//! A [`Scaffold`] turns a proxy URL, an optional model and a list of user
//! queries into the three textual artifacts an execution environment needs:
//! environment variables, a one-shot setup script, and one shell command per
//! query. Nothing here executes anything.

pub mod error;
pub mod models;
pub mod scaffold;
pub mod shell;

pub use error::ScaffoldError;
pub use models::{DEFAULT_MODEL, SUPPORTED_MODELS};
pub use scaffold::{
    ClaudeCodeScaffold, CodexScaffold, PLACEHOLDER_API_KEY, RenderRequest, RenderedEnvironment,
    RenderedPlan, Scaffold, ScaffoldRegistry, TurnState, render_plan,
};
