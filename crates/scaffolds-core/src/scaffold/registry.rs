//! Name-keyed registry of [`Scaffold`] implementations.

use std::collections::BTreeMap;

use tracing::debug;

use super::claude_code::ClaudeCodeScaffold;
use super::codex::CodexScaffold;
use super::trait_def::Scaffold;

/// A registry of [`Scaffold`] implementations, keyed by name.
///
/// # Example
///
/// ```
/// use scaffolds_core::{ClaudeCodeScaffold, Scaffold, ScaffoldRegistry};
///
/// let mut registry = ScaffoldRegistry::new();
/// registry.register(ClaudeCodeScaffold::new());
/// let scaffold = registry.get("claudecode").unwrap();
/// assert_eq!(scaffold.name(), "claudecode");
/// ```
#[derive(Default)]
pub struct ScaffoldRegistry {
    scaffolds: BTreeMap<String, Box<dyn Scaffold>>,
}

impl ScaffoldRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every scaffold shipped with this crate.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(ClaudeCodeScaffold::new());
        registry.register(CodexScaffold::new());
        registry
    }

    /// Register a scaffold adapter.
    ///
    /// The scaffold is stored under the name returned by [`Scaffold::name`].
    /// Names are unique: registering a second scaffold with the same name
    /// replaces the first, which is returned.
    pub fn register(&mut self, scaffold: impl Scaffold + 'static) -> Option<Box<dyn Scaffold>> {
        let name = scaffold.name().to_string();
        let previous = self.scaffolds.insert(name.clone(), Box::new(scaffold));
        if previous.is_some() {
            debug!(scaffold = %name, "replaced previously registered scaffold");
        }
        previous
    }

    /// Look up a scaffold by exact name.
    pub fn get(&self, name: &str) -> Option<&dyn Scaffold> {
        self.scaffolds.get(name).map(|b| b.as_ref())
    }

    /// Names of all registered scaffolds, sorted.
    pub fn list(&self) -> Vec<&str> {
        self.scaffolds.keys().map(|s| s.as_str()).collect()
    }

    /// Return the number of registered scaffolds.
    pub fn len(&self) -> usize {
        self.scaffolds.len()
    }

    /// Return `true` if no scaffolds are registered.
    pub fn is_empty(&self) -> bool {
        self.scaffolds.is_empty()
    }
}

impl std::fmt::Debug for ScaffoldRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScaffoldRegistry")
            .field("scaffolds", &self.list())
            .finish()
    }
}
