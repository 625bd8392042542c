//! Scaffold adapter interface for AI coding-assistant CLIs.
//!
//! This module defines the [`Scaffold`] trait that all tool adapters
//! implement, the concrete adapters, the [`ScaffoldRegistry`] for lookup by
//! name, and [`render_plan`], which drives one adapter end to end.
//!
//! # Architecture
//!
//! ```text
//! Orchestrator
//!     |
//!     v
//! ScaffoldRegistry --get("claudecode")--> &dyn Scaffold
//!     |                                        |
//!     |   docker_env(proxy, model) ------------+--> RenderedEnvironment
//!     |   setup_script(proxy, model) ----------+--> String (run once)
//!     |   build_commands(queries, sp, model) --+--> Vec<String> (one per query)
//! ```

pub mod claude_code;
pub mod codex;
pub mod plan;
pub mod registry;
pub mod trait_def;
pub mod types;

pub use claude_code::ClaudeCodeScaffold;
pub use codex::CodexScaffold;
pub use plan::{RenderRequest, render_plan};
pub use registry::ScaffoldRegistry;
pub use trait_def::Scaffold;
pub use types::{PLACEHOLDER_API_KEY, RenderedEnvironment, RenderedPlan, TurnState};
