//! Supported model identifiers.
//!
//! The names match the `model_name` entries the routing proxy exposes, so a
//! selector from this list can be passed to any scaffold unchanged.

/// Model identifiers the proxy is configured to serve.
pub const SUPPORTED_MODELS: &[&str] = &[
    // Anthropic
    "claude-sonnet-4-5-20250929",
    "claude-opus-4-5-20251101",
    "claude-haiku-4-5-20251001",
    // Google
    "gemini-3-pro",
    // DeepSeek
    "deepseek-chat",
];

/// Model used when the caller does not select one.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";

/// Return `true` if `model` is one of [`SUPPORTED_MODELS`].
pub fn is_supported(model: &str) -> bool {
    SUPPORTED_MODELS.contains(&model)
}

/// Resolve an optional selector to a concrete model name.
///
/// `None` and the empty string both fall back to [`DEFAULT_MODEL`]. Any other
/// value is returned unchanged, supported or not.
pub fn resolve_model(model: Option<&str>) -> &str {
    match model {
        Some(m) if !m.is_empty() => m,
        _ => DEFAULT_MODEL,
    }
}
