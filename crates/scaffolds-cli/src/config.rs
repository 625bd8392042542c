//! Configuration file management for scaffolds.
//!
//! Provides a TOML-based config file at `~/.config/scaffolds/config.toml` and
//! a resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub proxy: ProxySection,
    #[serde(default)]
    pub defaults: DefaultsSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProxySection {
    /// Proxy URL handed to every scaffold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DefaultsSection {
    /// Scaffold used when `--scaffold` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaffold: Option<String>,
    /// Model used when `--model` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the scaffolds config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/scaffolds` or
/// `~/.config/scaffolds`, including on macOS.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("scaffolds");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("scaffolds")
}

/// Return the path to the scaffolds config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

pub const PROXY_URL_ENV: &str = "SCAFFOLDS_PROXY_URL";
pub const SCAFFOLD_ENV: &str = "SCAFFOLDS_SCAFFOLD";
pub const MODEL_ENV: &str = "SCAFFOLDS_MODEL";

/// Values given on the command line, each optional.
#[derive(Debug, Default, Clone, Copy)]
pub struct CliOverrides<'a> {
    pub proxy_url: Option<&'a str>,
    pub scaffold: Option<&'a str>,
    pub model: Option<&'a str>,
}

/// Fully resolved configuration, ready for use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldsConfig {
    pub proxy_url: String,
    pub scaffold: String,
    pub model: Option<String>,
}

impl ScaffoldsConfig {
    /// Proxy URL as seen from inside a Docker container on the same host.
    pub const DEFAULT_PROXY_URL: &str = "http://host.docker.internal:4000";
    pub const DEFAULT_SCAFFOLD: &str = "claudecode";

    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// A missing config file is not an error; a malformed one is.
    pub fn resolve(cli: CliOverrides<'_>) -> Result<Self> {
        let path = config_path();
        let file_config = if path.exists() {
            debug!(path = %path.display(), "loading config file");
            Some(load_config()?)
        } else {
            None
        };
        let resolved = Self::resolve_with(cli, file_config.as_ref());
        debug!(?resolved, "resolved configuration");
        Ok(resolved)
    }

    /// Resolve against an already-loaded config file.
    pub fn resolve_with(cli: CliOverrides<'_>, file: Option<&ConfigFile>) -> Self {
        let proxy_url = pick(
            cli.proxy_url,
            PROXY_URL_ENV,
            file.and_then(|f| f.proxy.url.as_deref()),
        )
        .unwrap_or_else(|| Self::DEFAULT_PROXY_URL.to_string());

        let scaffold = pick(
            cli.scaffold,
            SCAFFOLD_ENV,
            file.and_then(|f| f.defaults.scaffold.as_deref()),
        )
        .unwrap_or_else(|| Self::DEFAULT_SCAFFOLD.to_string());

        let model = pick(
            cli.model,
            MODEL_ENV,
            file.and_then(|f| f.defaults.model.as_deref()),
        );

        Self {
            proxy_url,
            scaffold,
            model,
        }
    }
}

/// First non-empty value of: CLI flag, env var, config file.
fn pick(cli: Option<&str>, env_var: &str, file: Option<&str>) -> Option<String> {
    cli.map(str::to_string)
        .or_else(|| std::env::var(env_var).ok().filter(|v| !v.is_empty()))
        .or_else(|| file.map(str::to_string))
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        crate::test_util::lock_env()
    }

    fn clear_env() {
        unsafe { std::env::remove_var(PROXY_URL_ENV) };
        unsafe { std::env::remove_var(SCAFFOLD_ENV) };
        unsafe { std::env::remove_var(MODEL_ENV) };
    }

    fn file_config() -> ConfigFile {
        ConfigFile {
            proxy: ProxySection {
                url: Some("http://file:4000".to_string()),
            },
            defaults: DefaultsSection {
                scaffold: Some("codex".to_string()),
                model: Some("deepseek-chat".to_string()),
            },
        }
    }

    #[test]
    fn save_and_load_config_roundtrip() {
        let original = file_config();
        let contents = toml::to_string_pretty(&original).unwrap();
        let loaded: ConfigFile = toml::from_str(&contents).unwrap();

        assert_eq!(loaded.proxy.url, original.proxy.url);
        assert_eq!(loaded.defaults.scaffold, original.defaults.scaffold);
        assert_eq!(loaded.defaults.model, original.defaults.model);
    }

    #[test]
    fn partial_config_file_parses() {
        let loaded: ConfigFile = toml::from_str("[proxy]\nurl = \"http://x\"\n").unwrap();
        assert_eq!(loaded.proxy.url.as_deref(), Some("http://x"));
        assert!(loaded.defaults.scaffold.is_none());
        assert!(loaded.defaults.model.is_none());

        let empty: ConfigFile = toml::from_str("").unwrap();
        assert!(empty.proxy.url.is_none());
    }

    #[test]
    fn unset_model_is_not_serialized() {
        let cfg = ConfigFile::default();
        let contents = toml::to_string_pretty(&cfg).unwrap();
        assert!(!contents.contains("model"), "unexpected: {contents}");
    }

    #[test]
    fn resolve_defaults_when_nothing_set() {
        let _lock = lock_env();
        clear_env();

        let config = ScaffoldsConfig::resolve_with(CliOverrides::default(), None);
        assert_eq!(config.proxy_url, ScaffoldsConfig::DEFAULT_PROXY_URL);
        assert_eq!(config.scaffold, ScaffoldsConfig::DEFAULT_SCAFFOLD);
        assert!(config.model.is_none());
    }

    #[test]
    fn resolve_uses_config_file() {
        let _lock = lock_env();
        clear_env();

        let file = file_config();
        let config = ScaffoldsConfig::resolve_with(CliOverrides::default(), Some(&file));
        assert_eq!(config.proxy_url, "http://file:4000");
        assert_eq!(config.scaffold, "codex");
        assert_eq!(config.model.as_deref(), Some("deepseek-chat"));
    }

    #[test]
    fn resolve_with_env_var_overrides_config_file() {
        let _lock = lock_env();
        clear_env();
        unsafe { std::env::set_var(PROXY_URL_ENV, "http://env:4000") };
        unsafe { std::env::set_var(MODEL_ENV, "gemini-3-pro") };

        let file = file_config();
        let config = ScaffoldsConfig::resolve_with(CliOverrides::default(), Some(&file));

        clear_env();

        assert_eq!(config.proxy_url, "http://env:4000");
        assert_eq!(config.scaffold, "codex");
        assert_eq!(config.model.as_deref(), Some("gemini-3-pro"));
    }

    #[test]
    fn resolve_ignores_empty_env_var() {
        let _lock = lock_env();
        clear_env();
        unsafe { std::env::set_var(SCAFFOLD_ENV, "") };

        let config = ScaffoldsConfig::resolve_with(CliOverrides::default(), None);

        clear_env();

        assert_eq!(config.scaffold, ScaffoldsConfig::DEFAULT_SCAFFOLD);
    }

    #[test]
    fn resolve_with_cli_flag_overrides_all() {
        let _lock = lock_env();
        clear_env();
        unsafe { std::env::set_var(PROXY_URL_ENV, "http://env:4000") };
        unsafe { std::env::set_var(SCAFFOLD_ENV, "codex") };

        let file = file_config();
        let cli = CliOverrides {
            proxy_url: Some("http://cli:4000"),
            scaffold: Some("claudecode"),
            model: Some("claude-opus-4-5-20251101"),
        };
        let config = ScaffoldsConfig::resolve_with(cli, Some(&file));

        clear_env();

        assert_eq!(
            config,
            ScaffoldsConfig {
                proxy_url: "http://cli:4000".to_string(),
                scaffold: "claudecode".to_string(),
                model: Some("claude-opus-4-5-20251101".to_string()),
            }
        );
    }

    #[test]
    fn resolve_reads_config_file_from_xdg_dir() {
        let _lock = lock_env();
        clear_env();
        let tmp = tempfile::TempDir::new().unwrap();
        let orig_xdg = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe { std::env::set_var("XDG_CONFIG_HOME", tmp.path()) };

        let dir = tmp.path().join("scaffolds");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("config.toml"),
            "[proxy]\nurl = \"http://xdg:4000\"\n",
        )
        .unwrap();

        let result = ScaffoldsConfig::resolve(CliOverrides::default());

        // Restore env before asserting, to avoid poisoning the mutex on failure.
        match orig_xdg {
            Some(x) => unsafe { std::env::set_var("XDG_CONFIG_HOME", x) },
            None => unsafe { std::env::remove_var("XDG_CONFIG_HOME") },
        }

        assert_eq!(result.unwrap().proxy_url, "http://xdg:4000");
    }

    #[test]
    fn resolve_errors_on_malformed_config_file() {
        let _lock = lock_env();
        clear_env();
        let tmp = tempfile::TempDir::new().unwrap();
        let orig_xdg = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe { std::env::set_var("XDG_CONFIG_HOME", tmp.path()) };

        let dir = tmp.path().join("scaffolds");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.toml"), "this is = = not toml").unwrap();

        let result = ScaffoldsConfig::resolve(CliOverrides::default());

        match orig_xdg {
            Some(x) => unsafe { std::env::set_var("XDG_CONFIG_HOME", x) },
            None => unsafe { std::env::remove_var("XDG_CONFIG_HOME") },
        }

        let msg = format!("{:#}", result.unwrap_err());
        assert!(msg.contains("failed to parse config file"), "unexpected error: {msg}");
    }

    #[test]
    fn config_path_ends_with_expected_filename() {
        let _lock = lock_env();
        let path = config_path();
        assert!(
            path.ends_with("scaffolds/config.toml"),
            "unexpected config path: {}",
            path.display()
        );
    }
}
