//! i18n engine contract
//!
//! The adapter never translates anything itself; every lookup goes through an
//! [`Engine`]. [`MemoryEngine`] is a small in-process implementation used by
//! the demo and the tests.

mod emitter;
mod memory;

pub use emitter::EventEmitter;
pub use memory::{MemoryEngine, MemoryEngineBuilder};

use crate::core::{Namespaces, TOptions};
use regex::Regex;
use serde_json::Value;
use std::rc::Rc;

/// Handle returned by `on`, used to unsubscribe
pub type ListenerId = u64;

/// Event callback; receives the name of the event that fired
pub type Listener = Rc<dyn Fn(&str)>;

/// Translator pre-bound to a language and namespace list
pub type FixedT = Rc<dyn Fn(&str, &TOptions) -> String>;

/// Operations the adapter needs from an i18n engine
pub trait Engine {
    /// Translate `key` with the given options
    fn t(&self, key: &str, options: &TOptions) -> String;

    /// Subscribe to one or more space-separated events
    fn on(&self, events: &str, listener: Listener) -> ListenerId;

    /// Unsubscribe a listener from one event
    fn off(&self, event: &str, id: ListenerId);

    /// Subscribe to resource store events. `None` when the engine has no store emitter.
    fn on_store(&self, _events: &str, _listener: Listener) -> Option<ListenerId> {
        None
    }

    fn off_store(&self, _event: &str, _id: ListenerId) {}

    fn is_initialized(&self) -> bool;

    /// Current language tag
    fn language(&self) -> String;

    /// Request namespaces to be made available
    fn load_namespaces(&self, namespaces: &[String]);

    /// Insert a resource bundle for one language and namespace
    fn add_resource_bundle(&self, lng: &str, ns: &str, bundle: Value, deep: bool, overwrite: bool);

    /// Translator bound to `lng` (or the current language) and `namespaces`
    fn get_fixed_t(&self, lng: Option<&str>, namespaces: &[String]) -> FixedT;

    fn default_ns(&self) -> Namespaces;

    fn ns_separator(&self) -> String;

    /// Pattern matching one placeholder wrapped in `prefix`/`suffix`; group 1 is the token
    fn interpolation_pattern(&self, prefix: &str, suffix: &str) -> Regex {
        placeholder_regex(prefix, suffix)
    }

    /// Whether a listener may call `off` on itself while being dispatched
    fn supports_sync_off(&self) -> bool {
        false
    }
}

/// Build the placeholder pattern for a delimiter pair
pub fn placeholder_regex(prefix: &str, suffix: &str) -> Regex {
    let pattern = format!("{}(.+?){}", regex::escape(prefix), regex::escape(suffix));
    Regex::new(&pattern).expect("escaped placeholder pattern compiles")
}
