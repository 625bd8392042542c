//! The `Scaffold` trait -- the adapter interface for coding-assistant CLIs.
//!
//! Each concrete scaffold (Claude Code, Codex CLI, etc.) implements this
//! trait. The trait is object-safe so it can be stored as
//! `Box<dyn Scaffold>` in the [`super::ScaffoldRegistry`].

use super::types::RenderedEnvironment;

/// Adapter interface for rendering the artifacts one coding-assistant CLI
/// needs to run inside an isolated environment.
///
/// Implementors are stateless across calls: every method is a pure function
/// of its arguments and the adapter's static configuration. None of them
/// validate the model selector; see [`super::render_plan`] for that.
pub trait Scaffold: Send + Sync {
    /// Stable identity used for selection (e.g. "claudecode").
    fn name(&self) -> &str;

    /// Environment variables that route the tool's API calls through
    /// `proxy_url`.
    ///
    /// The credential is always [`super::PLACEHOLDER_API_KEY`]; the proxy
    /// does not authenticate callers.
    fn docker_env(&self, proxy_url: &str, model: Option<&str>) -> RenderedEnvironment;

    /// Shell script that creates the tool's config directory and writes its
    /// config file. Run once, non-interactively, before any task command.
    fn setup_script(&self, proxy_url: &str, model: Option<&str>) -> String;

    /// One shell command per query, in order.
    ///
    /// The first command starts a session with the resolved model and, if
    /// given, the system prompt. Every later command continues that session
    /// and carries neither.
    fn build_commands(
        &self,
        queries: &[String],
        system_prompt: Option<&str>,
        model: Option<&str>,
    ) -> Vec<String>;
}

// Compile-time assertion: Scaffold must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn Scaffold) {}
};
