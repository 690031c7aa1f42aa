//! Environment lookup abstraction.
//!
//! The process environment is the toolkit's implicit input store. Hiding it
//! behind a trait lets tests supply synthetic environments without mutating
//! real process state (which is unsound under the parallel test runner).
//!
//! Lookups are never cached: other collaborators in the same process may
//! mutate the environment between calls.

use std::collections::HashMap;

/// Read-only string-to-string lookup, normally backed by the process
/// environment.
pub trait EnvProvider {
    /// Returns the value for `key`, or `None` if unset.
    fn get(&self, key: &str) -> Option<String>;

    /// Returns the value for `key`, defaulting to the empty string.
    ///
    /// The orchestrator contract treats unset and empty identically, so most
    /// call sites want this form.
    fn get_or_empty(&self, key: &str) -> String {
        self.get(key).unwrap_or_default()
    }
}

/// The live process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvProvider for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Synthetic environment for tests and embedding.
impl EnvProvider for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl<E: EnvProvider + ?Sized> EnvProvider for &E {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}
