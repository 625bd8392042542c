//! End-to-end rendering for one query sequence.
//!
//! [`render_plan`] is what an orchestrator calls: it selects a scaffold by
//! name, rejects inputs the scaffold would render into a broken environment,
//! and then runs the three scaffold operations in their required order.

use tracing::debug;

use super::registry::ScaffoldRegistry;
use super::types::RenderedPlan;
use crate::error::ScaffoldError;
use crate::models::{SUPPORTED_MODELS, is_supported, resolve_model};

/// Inputs for [`render_plan`].
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    /// Identity of the scaffold to use.
    pub scaffold: &'a str,
    /// Where model requests are routed. Must be non-empty.
    pub proxy_url: &'a str,
    /// Model selector; `None` or empty selects the default model.
    pub model: Option<&'a str>,
    /// Applied to the first query only.
    pub system_prompt: Option<&'a str>,
    /// User queries, in conversation order.
    pub queries: &'a [String],
}

impl<'a> RenderRequest<'a> {
    /// Create a request with no model, no system prompt and no queries.
    pub fn new(scaffold: &'a str, proxy_url: &'a str) -> Self {
        Self {
            scaffold,
            proxy_url,
            model: None,
            system_prompt: None,
            queries: &[],
        }
    }

    /// Set the model selector.
    pub fn model(mut self, model: Option<&'a str>) -> Self {
        self.model = model;
        self
    }

    /// Set the system prompt.
    pub fn system_prompt(mut self, system_prompt: Option<&'a str>) -> Self {
        self.system_prompt = system_prompt;
        self
    }

    /// Set the queries.
    pub fn queries(mut self, queries: &'a [String]) -> Self {
        self.queries = queries;
        self
    }
}

/// Validate `request` and render environment, setup script and commands
/// with the scaffold it names.
///
/// Fails with:
/// - [`ScaffoldError::UnknownScaffold`] if no scaffold has that name,
/// - [`ScaffoldError::InvalidInput`] if the proxy URL is empty,
/// - [`ScaffoldError::InvalidModel`] if a non-empty model is not in
///   [`SUPPORTED_MODELS`].
pub fn render_plan(
    registry: &ScaffoldRegistry,
    request: &RenderRequest<'_>,
) -> Result<RenderedPlan, ScaffoldError> {
    let scaffold = registry
        .get(request.scaffold)
        .ok_or_else(|| ScaffoldError::UnknownScaffold {
            name: request.scaffold.to_string(),
            available: registry.list().join(", "),
        })?;

    if request.proxy_url.trim().is_empty() {
        return Err(ScaffoldError::InvalidInput("proxy URL must not be empty".to_string()));
    }

    if let Some(model) = request.model.filter(|m| !m.is_empty()) {
        if !is_supported(model) {
            return Err(ScaffoldError::InvalidModel {
                model: model.to_string(),
                supported: SUPPORTED_MODELS.join(", "),
            });
        }
    }

    let model = resolve_model(request.model);
    debug!(
        scaffold = request.scaffold,
        model,
        queries = request.queries.len(),
        "rendering scaffold plan"
    );

    let env = scaffold.docker_env(request.proxy_url, request.model);
    let setup_script = scaffold.setup_script(request.proxy_url, request.model);
    let commands = scaffold.build_commands(request.queries, request.system_prompt, request.model);

    Ok(RenderedPlan {
        scaffold: scaffold.name().to_string(),
        model: model.to_string(),
        env,
        setup_script,
        commands,
    })
}
