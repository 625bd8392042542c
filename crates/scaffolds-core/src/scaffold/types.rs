//! Types shared by every scaffold adapter.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::shell::{ShellCommand, quote_single};

/// Credential handed to every tool. The proxy ignores it.
pub const PLACEHOLDER_API_KEY: &str = "fake-key";

/// Environment variable name -> value.
///
/// A `BTreeMap` so repeated renders iterate (and serialize) identically.
pub type RenderedEnvironment = BTreeMap<String, String>;

/// Position of a query within a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// First query: selects the model and carries the system prompt.
    Initial,
    /// Any later query: resumes the previous session.
    Continuation,
}

impl TurnState {
    /// Turn state for the query at `index`.
    pub fn at(index: usize) -> Self {
        if index == 0 {
            Self::Initial
        } else {
            Self::Continuation
        }
    }
}

/// Render one command per query, passing each query's [`TurnState`] to
/// `render`. Output is index-aligned with `queries`.
pub fn render_turns<F>(queries: &[String], mut render: F) -> Vec<String>
where
    F: FnMut(TurnState, &str) -> ShellCommand,
{
    queries
        .iter()
        .enumerate()
        .map(|(i, query)| render(TurnState::at(i), query).render())
        .collect()
}

/// Script that creates `dir` and writes `payload` to `dir/file_name`.
///
/// `dir` is emitted unquoted so a leading `~` expands; it must be a static
/// path. The payload is single-quoted and written with `printf` so its bytes
/// reach the file unchanged, backslashes and single quotes included.
pub(crate) fn config_file_script(dir: &str, file_name: &str, payload: &str) -> String {
    format!(
        "mkdir -p {dir} && printf '%s\\n' {} > {dir}/{file_name}",
        quote_single(payload)
    )
}

/// Everything an orchestrator needs to run one query sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPlan {
    /// Identity of the scaffold that rendered this plan.
    pub scaffold: String,
    /// Model the initial command selects.
    pub model: String,
    /// Variables to set on the execution environment.
    pub env: RenderedEnvironment,
    /// Script to run once before any command.
    pub setup_script: String,
    /// Commands to run in order, one per query.
    pub commands: Vec<String>,
}
