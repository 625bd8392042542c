mod config;
mod render_cmd;
#[cfg(test)]
mod test_util;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use scaffolds_core::models::{DEFAULT_MODEL, SUPPORTED_MODELS};
use scaffolds_core::{RenderRequest, ScaffoldRegistry, render_plan};

use config::{CliOverrides, ScaffoldsConfig};

#[derive(Parser)]
#[command(
    name = "scaffolds",
    about = "Render env vars, setup scripts and commands for AI coding-assistant CLIs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every rendering subcommand.
#[derive(Args)]
struct ScaffoldArgs {
    /// Scaffold to render for (overrides SCAFFOLDS_SCAFFOLD)
    #[arg(long)]
    scaffold: Option<String>,
    /// Proxy URL model requests are routed to (overrides SCAFFOLDS_PROXY_URL)
    #[arg(long)]
    proxy_url: Option<String>,
    /// Model to select (overrides SCAFFOLDS_MODEL)
    #[arg(long)]
    model: Option<String>,
}

impl ScaffoldArgs {
    fn resolve(&self) -> anyhow::Result<ScaffoldsConfig> {
        ScaffoldsConfig::resolve(CliOverrides {
            proxy_url: self.proxy_url.as_deref(),
            scaffold: self.scaffold.as_deref(),
            model: self.model.as_deref(),
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write a scaffolds config file
    Init {
        /// Proxy URL to store
        #[arg(long, default_value = ScaffoldsConfig::DEFAULT_PROXY_URL)]
        proxy_url: String,
        /// Default scaffold to store
        #[arg(long, default_value = ScaffoldsConfig::DEFAULT_SCAFFOLD)]
        scaffold: String,
        /// Default model to store
        #[arg(long)]
        model: Option<String>,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// List registered scaffolds
    List,
    /// List supported models
    Models,
    /// Print the environment variables for a scaffold
    Env {
        #[command(flatten)]
        scaffold: ScaffoldArgs,
        /// Print a JSON object instead of KEY=VALUE lines
        #[arg(long)]
        json: bool,
    },
    /// Print the one-time setup script for a scaffold
    Setup {
        #[command(flatten)]
        scaffold: ScaffoldArgs,
    },
    /// Print one command per query
    Commands {
        #[command(flatten)]
        scaffold: ScaffoldArgs,
        /// System prompt for the first query
        #[arg(long)]
        system_prompt: Option<String>,
        /// Print a JSON array instead of one command per line
        #[arg(long)]
        json: bool,
        /// Queries, in conversation order
        queries: Vec<String>,
    },
    /// Print env, setup script and commands as one JSON document
    Render {
        #[command(flatten)]
        scaffold: ScaffoldArgs,
        /// System prompt for the first query
        #[arg(long)]
        system_prompt: Option<String>,
        /// JSON file holding an array of query strings ("-" for stdin)
        #[arg(long)]
        queries: String,
    },
}

/// Execute the `scaffolds init` command: write config file.
///
/// The values are checked with [`render_plan`] first, so a config that every
/// later command would reject is never written.
fn cmd_init(
    registry: &ScaffoldRegistry,
    proxy_url: &str,
    scaffold: &str,
    model: Option<&str>,
    force: bool,
) -> anyhow::Result<()> {
    render_plan(registry, &RenderRequest::new(scaffold, proxy_url).model(model))
        .context("refusing to write config")?;

    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile {
        proxy: config::ProxySection {
            url: Some(proxy_url.to_string()),
        },
        defaults: config::DefaultsSection {
            scaffold: Some(scaffold.to_string()),
            model: model.map(str::to_string),
        },
    };

    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  proxy.url = {proxy_url}");
    println!("  defaults.scaffold = {scaffold}");
    if let Some(model) = model {
        println!("  defaults.model = {model}");
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = ScaffoldRegistry::with_builtin();

    match cli.command {
        Commands::Init {
            proxy_url,
            scaffold,
            model,
            force,
        } => {
            cmd_init(&registry, &proxy_url, &scaffold, model.as_deref(), force)?;
        }
        Commands::List => {
            for name in registry.list() {
                println!("{name}");
            }
        }
        Commands::Models => {
            for model in SUPPORTED_MODELS {
                if *model == DEFAULT_MODEL {
                    println!("{model} (default)");
                } else {
                    println!("{model}");
                }
            }
        }
        Commands::Env { scaffold, json } => {
            let resolved = scaffold.resolve()?;
            println!("{}", render_cmd::run_env(&registry, &resolved, json)?);
        }
        Commands::Setup { scaffold } => {
            let resolved = scaffold.resolve()?;
            println!("{}", render_cmd::run_setup(&registry, &resolved)?);
        }
        Commands::Commands {
            scaffold,
            system_prompt,
            json,
            queries,
        } => {
            let resolved = scaffold.resolve()?;
            let out = render_cmd::run_commands(
                &registry,
                &resolved,
                system_prompt.as_deref(),
                &queries,
                json,
            )?;
            if !out.is_empty() {
                println!("{out}");
            }
        }
        Commands::Render {
            scaffold,
            system_prompt,
            queries,
        } => {
            let resolved = scaffold.resolve()?;
            let queries_json = render_cmd::read_queries(&queries)?;
            let out = render_cmd::run_render(
                &registry,
                &resolved,
                system_prompt.as_deref(),
                &queries_json,
            )?;
            println!("{out}");
        }
    }

    Ok(())
}
