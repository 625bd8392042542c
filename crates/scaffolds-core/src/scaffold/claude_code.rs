//! Claude Code scaffold adapter.
//!
//! Routes the `claude` CLI through the proxy via `ANTHROPIC_BASE_URL`,
//! pre-approves its tools in `~/.claude/settings.json`, and renders
//! `claude -p` invocations that continue one session with `-c`.

use serde_json::json;

use super::trait_def::Scaffold;
use super::types::{
    PLACEHOLDER_API_KEY, RenderedEnvironment, TurnState, config_file_script, render_turns,
};
use crate::models::resolve_model;
use crate::shell::ShellCommand;

const BASE_URL_VAR: &str = "ANTHROPIC_BASE_URL";
const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

const SETTINGS_DIR: &str = "~/.claude";
const SETTINGS_FILE: &str = "settings.json";

/// Tools Claude Code may use without asking for confirmation.
pub const ALLOWED_PERMISSIONS: &[&str] = &[
    "Bash(*)",
    "Write(*)",
    "Edit(*)",
    "Read(*)",
    "WebFetch(*)",
    "TodoRead(*)",
    "TodoWrite(*)",
    "Task(*)",
    "Glob(*)",
    "Grep(*)",
    "LS(*)",
];

/// Scaffold adapter for [Claude Code](https://docs.anthropic.com/en/docs/claude-code).
#[derive(Debug, Clone)]
pub struct ClaudeCodeScaffold {
    /// Program name used in rendered commands. Defaults to `"claude"`.
    claude_binary: String,
}

impl ClaudeCodeScaffold {
    /// Create an adapter whose commands invoke `claude` from `$PATH`.
    pub fn new() -> Self {
        Self::with_binary("claude")
    }

    /// Create an adapter whose commands invoke a custom binary.
    ///
    /// Useful when the image installs `claude` in a non-standard location.
    /// A leading `~/` is left for the shell to expand.
    pub fn with_binary(path: impl Into<String>) -> Self {
        Self {
            claude_binary: path.into(),
        }
    }

    /// Settings document written by the setup script.
    fn settings(proxy_url: &str) -> serde_json::Value {
        json!({
            "env": {
                BASE_URL_VAR: proxy_url,
            },
            "permissions": {
                "allow": ALLOWED_PERMISSIONS,
            },
        })
    }
}

impl Default for ClaudeCodeScaffold {
    fn default() -> Self {
        Self::new()
    }
}

impl Scaffold for ClaudeCodeScaffold {
    fn name(&self) -> &str {
        "claudecode"
    }

    fn docker_env(&self, proxy_url: &str, _model: Option<&str>) -> RenderedEnvironment {
        RenderedEnvironment::from([
            (BASE_URL_VAR.to_string(), proxy_url.to_string()),
            (API_KEY_VAR.to_string(), PLACEHOLDER_API_KEY.to_string()),
        ])
    }

    fn setup_script(&self, proxy_url: &str, _model: Option<&str>) -> String {
        let settings_json = Self::settings(proxy_url).to_string();
        config_file_script(SETTINGS_DIR, SETTINGS_FILE, &settings_json)
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
            let cmd = ShellCommand::new(self.claude_binary.as_str());
            match turn {
                TurnState::Initial => {
                    let cmd = cmd
                        .flag("--model")
                        .word(model_name)
                        .flag("--dangerously-skip-permissions")
                        .flag("-p")
                        .text(query);
                    match system_prompt {
                        Some(sp) => cmd.flag("--system-prompt").text(sp),
                        None => cmd,
                    }
                }
                // The session already carries the model and system prompt.
                TurnState::Continuation => cmd
                    .flag("--dangerously-skip-permissions")
                    .flag("-c")
                    .flag("-p")
                    .text(query),
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
