//! Adapter configuration

use crate::core::{Error, Result};
use crate::host::ComponentInstance;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::rc::Rc;

/// Namespace chosen for a component instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentNamespace {
    pub namespace: String,
    /// Whether the namespace may be eagerly loaded (see `load_component_namespace`)
    pub load_namespace: bool,
}

/// Custom namespace function, replacing the name/tag based default
pub type NamespaceFn = Rc<dyn Fn(&ComponentInstance) -> ComponentNamespace>;

/// Root adapter options
#[derive(Clone, Serialize, Deserialize)]
pub struct AdapterOptions {
    /// Space-separated engine events that bump `loaded_at` (empty disables)
    #[serde(default = "default_bind_i18n")]
    pub bind_i18n: String,
    /// Space-separated resource store events that bump `loaded_at` (empty disables)
    #[serde(default = "default_bind_store")]
    pub bind_store: String,
    /// Eagerly load each named component's own namespace
    #[serde(default)]
    pub load_component_namespace: bool,
    /// Delay before `waitForT` drops its `initialized` listener on engines
    /// that cannot unsubscribe from inside a dispatch
    #[serde(default = "default_wait_unsubscribe_delay_ms")]
    pub wait_unsubscribe_delay_ms: u64,
    #[serde(skip)]
    pub component_namespace: Option<NamespaceFn>,
}

fn default_bind_i18n() -> String {
    "languageChanged loaded".to_string()
}

fn default_bind_store() -> String {
    "added removed".to_string()
}

fn default_wait_unsubscribe_delay_ms() -> u64 {
    1000
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            bind_i18n: default_bind_i18n(),
            bind_store: default_bind_store(),
            load_component_namespace: false,
            wait_unsubscribe_delay_ms: default_wait_unsubscribe_delay_ms(),
            component_namespace: None,
        }
    }
}

impl fmt::Debug for AdapterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterOptions")
            .field("bind_i18n", &self.bind_i18n)
            .field("bind_store", &self.bind_store)
            .field("load_component_namespace", &self.load_component_namespace)
            .field("wait_unsubscribe_delay_ms", &self.wait_unsubscribe_delay_ms)
            .field("component_namespace", &self.component_namespace.is_some())
            .finish()
    }
}

impl AdapterOptions {
    /// Parse options from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse adapter options: {}", e)))
    }

    /// Load options from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Serialize options back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize adapter options: {}", e)))
    }

    /// Replace the default namespace function
    pub fn with_component_namespace(
        mut self,
        f: impl Fn(&ComponentInstance) -> ComponentNamespace + 'static,
    ) -> Self {
        self.component_namespace = Some(Rc::new(f));
        self
    }

    /// Engine events to listen to, split on whitespace
    pub fn i18n_events(&self) -> Vec<&str> {
        self.bind_i18n.split_whitespace().collect()
    }

    /// Store events to listen to, split on whitespace
    pub fn store_events(&self) -> Vec<&str> {
        self.bind_store.split_whitespace().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = AdapterOptions::default();
        assert_eq!(options.i18n_events(), vec!["languageChanged", "loaded"]);
        assert_eq!(options.store_events(), vec!["added", "removed"]);
        assert!(!options.load_component_namespace);
        assert_eq!(options.wait_unsubscribe_delay_ms, 1000);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let options = AdapterOptions::from_toml_str(
            r#"
            bind_store = ""
            load_component_namespace = true
            "#,
        )
        .unwrap();

        assert_eq!(options.bind_i18n, "languageChanged loaded");
        assert!(options.store_events().is_empty());
        assert!(options.load_component_namespace);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AdapterOptions::from_toml_str("load_component_namespace = \"yes\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_toml_roundtrip_keeps_values() {
        let mut options = AdapterOptions::default();
        options.wait_unsubscribe_delay_ms = 250;
        let text = options.to_toml_string().unwrap();
        let parsed = AdapterOptions::from_toml_str(&text).unwrap();
        assert_eq!(parsed.wait_unsubscribe_delay_ms, 250);
    }
}
