//! Rendering subcommands: `env`, `setup`, `commands`, `render`.
//!
//! Each function returns the text to print so the binary stays a thin
//! dispatcher. All of them go through [`render_plan`], so an unknown
//! scaffold, empty proxy URL or unsupported model is rejected up front.

use std::io::Read;

use anyhow::{Context, Result};
use scaffolds_core::{RenderRequest, RenderedPlan, ScaffoldRegistry, render_plan};

use crate::config::ScaffoldsConfig;

fn plan(
    registry: &ScaffoldRegistry,
    config: &ScaffoldsConfig,
    system_prompt: Option<&str>,
    queries: &[String],
) -> Result<RenderedPlan> {
    let request = RenderRequest::new(&config.scaffold, &config.proxy_url)
        .model(config.model.as_deref())
        .system_prompt(system_prompt)
        .queries(queries);
    render_plan(registry, &request)
        .with_context(|| format!("failed to render scaffold {:?}", config.scaffold))
}

/// Render the environment as `KEY=VALUE` lines, or a JSON object.
pub fn run_env(
    registry: &ScaffoldRegistry,
    config: &ScaffoldsConfig,
    json: bool,
) -> Result<String> {
    let plan = plan(registry, config, None, &[])?;
    if json {
        return serde_json::to_string_pretty(&plan.env).context("failed to serialize environment");
    }
    Ok(plan
        .env
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Render the setup script.
pub fn run_setup(registry: &ScaffoldRegistry, config: &ScaffoldsConfig) -> Result<String> {
    Ok(plan(registry, config, None, &[])?.setup_script)
}

/// Render one command per query, one per line or as a JSON array.
///
/// Line output is ambiguous when a query contains a newline; use JSON then.
pub fn run_commands(
    registry: &ScaffoldRegistry,
    config: &ScaffoldsConfig,
    system_prompt: Option<&str>,
    queries: &[String],
    json: bool,
) -> Result<String> {
    let plan = plan(registry, config, system_prompt, queries)?;
    if json {
        return serde_json::to_string_pretty(&plan.commands)
            .context("failed to serialize commands");
    }
    Ok(plan.commands.join("\n"))
}

/// Render the full plan as pretty JSON. `queries_json` is a JSON array of
/// strings.
pub fn run_render(
    registry: &ScaffoldRegistry,
    config: &ScaffoldsConfig,
    system_prompt: Option<&str>,
    queries_json: &str,
) -> Result<String> {
    let queries: Vec<String> =
        serde_json::from_str(queries_json).context("queries must be a JSON array of strings")?;
    let plan = plan(registry, config, system_prompt, &queries)?;
    serde_json::to_string_pretty(&plan).context("failed to serialize plan")
}

/// Read a queries file, or stdin when `path` is `-`.
pub fn read_queries(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read queries from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("failed to read queries file {path}"))
    }
}
