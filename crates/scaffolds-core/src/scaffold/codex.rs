//! Codex CLI scaffold adapter.
//!
//! Declares the proxy as a custom model provider in `~/.codex/config.toml`,
//! disables approvals and the sandbox there, and renders `codex exec`
//! invocations that continue one session with `resume --last`.

use toml::{Table, Value};

use super::trait_def::Scaffold;
use super::types::{
    PLACEHOLDER_API_KEY, RenderedEnvironment, TurnState, config_file_script, render_turns,
};
use crate::models::resolve_model;
use crate::shell::ShellCommand;

const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
const API_KEY_VAR: &str = "OPENAI_API_KEY";

const CONFIG_DIR: &str = "~/.codex";
const CONFIG_FILE: &str = "config.toml";

/// Provider id under `[model_providers]` that points at the proxy.
const PROVIDER_ID: &str = "proxy";

/// Codex never stops to ask for approval.
pub const APPROVAL_POLICY: &str = "never";
/// Commands run without Codex's own sandbox; the container is the sandbox.
pub const SANDBOX_MODE: &str = "danger-full-access";

/// Scaffold adapter for the [Codex CLI](https://github.com/openai/codex).
///
/// `codex exec` has no system prompt flag, so a system prompt is prepended
/// to the first query, separated by a blank line. Every prompt follows `--`
/// so a query starting with `-` is never read as an option.
#[derive(Debug, Clone)]
pub struct CodexScaffold {
    codex_binary: String,
}

impl CodexScaffold {
    /// Create an adapter whose commands invoke `codex` from `$PATH`.
    pub fn new() -> Self {
        Self::with_binary("codex")
    }

    /// Create an adapter whose commands invoke a custom binary.
    pub fn with_binary(path: impl Into<String>) -> Self {
        Self {
            codex_binary: path.into(),
        }
    }

    /// Config document written by the setup script.
    fn config(proxy_url: &str) -> Table {
        let mut provider = Table::new();
        provider.insert("name".to_string(), Value::from(PROVIDER_ID));
        provider.insert("base_url".to_string(), Value::from(proxy_url));
        provider.insert("env_key".to_string(), Value::from(API_KEY_VAR));
        provider.insert("wire_api".to_string(), Value::from("chat"));

        let mut providers = Table::new();
        providers.insert(PROVIDER_ID.to_string(), Value::Table(provider));

        let mut config = Table::new();
        config.insert("model_provider".to_string(), Value::from(PROVIDER_ID));
        config.insert("approval_policy".to_string(), Value::from(APPROVAL_POLICY));
        config.insert("sandbox_mode".to_string(), Value::from(SANDBOX_MODE));
        config.insert("model_providers".to_string(), Value::Table(providers));
        config
    }
}

impl Default for CodexScaffold {
    fn default() -> Self {
        Self::new()
    }
}

impl Scaffold for CodexScaffold {
    fn name(&self) -> &str {
        "codex"
    }

    fn docker_env(&self, proxy_url: &str, _model: Option<&str>) -> RenderedEnvironment {
        RenderedEnvironment::from([
            (BASE_URL_VAR.to_string(), proxy_url.to_string()),
            (API_KEY_VAR.to_string(), PLACEHOLDER_API_KEY.to_string()),
        ])
    }

    fn setup_script(&self, proxy_url: &str, _model: Option<&str>) -> String {
        let config_toml = Self::config(proxy_url).to_string();
        config_file_script(CONFIG_DIR, CONFIG_FILE, config_toml.trim_end())
    }

    fn build_commands(
        &self,
        queries: &[String],
        system_prompt: Option<&str>,
        model: Option<&str>,
    ) -> Vec<String> {
        let model_name = resolve_model(model);
        let system_prompt = system_prompt.filter(|sp| !sp.is_empty());

        render_turns(queries, |turn, query| {
            let cmd = ShellCommand::new(self.codex_binary.as_str()).flag("exec");
            match turn {
                TurnState::Initial => {
                    let prompt = match system_prompt {
                        Some(sp) => format!("{sp}\n\n{query}"),
                        None => query.to_string(),
                    };
                    cmd.flag("--model")
                        .word(model_name)
                        .flag("--dangerously-bypass-approvals-and-sandbox")
                        .flag("--skip-git-repo-check")
                        .flag("--")
                        .text(prompt)
                }
                TurnState::Continuation => cmd
                    .flag("--dangerously-bypass-approvals-and-sandbox")
                    .flag("--skip-git-repo-check")
                    .flag("resume")
                    .flag("--last")
                    .flag("--")
                    .text(query),
            }
        })
    }
}
