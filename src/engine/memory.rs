//! In-memory i18n engine
//!
//! Resources live in a `language -> namespace -> JSON` store. Lookups walk the
//! requested language, then the fallback language, across the namespace list
//! in order. Missing keys return the key itself; placeholders without a value
//! are left in the output verbatim.

use super::{placeholder_regex, Engine, EventEmitter, FixedT, Listener, ListenerId};
use crate::core::{deep_merge, deep_merge_keep, Namespaces, TOptions};
use regex::Captures;
use serde_json::{Map, Value};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

type Store = HashMap<String, HashMap<String, Value>>;

struct Inner {
    language: RefCell<String>,
    fallback_lng: Option<String>,
    default_ns: Namespaces,
    ns_separator: String,
    key_separator: String,
    prefix: String,
    suffix: String,
    initialized: Cell<bool>,
    sync_off: bool,
    store: RefCell<Store>,
    loaded: RefCell<Vec<String>>,
    events: EventEmitter,
    store_events: EventEmitter,
}

/// Cheaply clonable handle to an in-memory engine
#[derive(Clone)]
pub struct MemoryEngine {
    inner: Rc<Inner>,
}

impl MemoryEngine {
    pub fn builder() -> MemoryEngineBuilder {
        MemoryEngineBuilder::default()
    }

    /// Mark the engine initialized and emit `initialized`
    pub fn init(&self) {
        self.inner.initialized.set(true);
        log::debug!("Engine initialized (language: {})", self.inner.language.borrow());
        self.inner.events.emit("initialized");
    }

    /// Switch language and emit `languageChanged`
    pub fn change_language(&self, lng: &str) {
        *self.inner.language.borrow_mut() = lng.to_string();
        log::debug!("Language changed to: {}", lng);
        self.inner.events.emit("languageChanged");
    }

    /// Add one key (split on the key separator) and emit `added`
    pub fn add_resource(&self, lng: &str, ns: &str, key: &str, value: &str) {
        let mut bundle = Value::String(value.to_string());
        for part in self.inner.key_parts(key).into_iter().rev() {
            let mut object = Map::new();
            object.insert(part.to_string(), bundle);
            bundle = Value::Object(object);
        }
        self.add_resource_bundle(lng, ns, bundle, true, true);
    }

    /// Drop a whole bundle and emit `removed`
    pub fn remove_resource_bundle(&self, lng: &str, ns: &str) {
        let removed = self
            .inner
            .store
            .borrow_mut()
            .get_mut(lng)
            .and_then(|namespaces| namespaces.remove(ns))
            .is_some();
        if removed {
            self.inner.store_events.emit("removed");
        }
    }

    pub fn get_resource_bundle(&self, lng: &str, ns: &str) -> Option<Value> {
        self.inner.store.borrow().get(lng)?.get(ns).cloned()
    }

    /// Namespaces requested through `load_namespaces`, in request order
    pub fn loaded_namespaces(&self) -> Vec<String> {
        self.inner.loaded.borrow().clone()
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.inner.events.listener_count(event)
    }

    pub fn store_listener_count(&self, event: &str) -> usize {
        self.inner.store_events.listener_count(event)
    }
}

impl Default for MemoryEngine {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Inner {
    fn key_parts<'a>(&self, key: &'a str) -> Vec<&'a str> {
        if self.key_separator.is_empty() {
            vec![key]
        } else {
            key.split(self.key_separator.as_str()).collect()
        }
    }

    fn lookup(&self, lng: &str, ns: &str, key: &str) -> Option<String> {
        let store = self.store.borrow();
        let mut node = store.get(lng)?.get(ns)?;
        for part in self.key_parts(key) {
            node = node.get(part)?;
        }
        node.as_str().map(str::to_string)
    }

    fn translate(&self, key: &str, options: &TOptions) -> String {
        let lng = options
            .get("lng")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| self.language.borrow().clone());

        let mut namespaces = options
            .get("ns")
            .and_then(Namespaces::from_value)
            .unwrap_or_else(|| self.default_ns.clone())
            .into_vec();

        let mut lookup_key = key;
        if !self.ns_separator.is_empty() {
            if let Some((ns, rest)) = key.split_once(self.ns_separator.as_str()) {
                namespaces = vec![ns.to_string()];
                lookup_key = rest;
            }
        }

        let mut languages = vec![lng];
        if let Some(fallback) = &self.fallback_lng {
            if !languages.contains(fallback) {
                languages.push(fallback.clone());
            }
        }

        for lng in &languages {
            for ns in &namespaces {
                if let Some(text) = self.lookup(lng, ns, lookup_key) {
                    return self.interpolate(&text, options);
                }
            }
        }

        log::debug!("Missing key '{}' for languages {:?} in {:?}", key, languages, namespaces);
        key.to_string()
    }

    fn interpolate(&self, text: &str, options: &TOptions) -> String {
        let overrides = options.get("interpolation").and_then(Value::as_object);
        let delimiter = |name: &str, default: &str| {
            overrides
                .and_then(|o| o.get(name))
                .and_then(Value::as_str)
                .unwrap_or(default)
                .to_string()
        };
        let prefix = delimiter("prefix", &self.prefix);
        let suffix = delimiter("suffix", &self.suffix);

        placeholder_regex(&prefix, &suffix)
            .replace_all(text, |caps: &Captures<'_>| {
                match options.get(caps[1].trim()) {
                    Some(Value::String(value)) => value.clone(),
                    Some(Value::Null) | None => caps[0].to_string(),
                    Some(value) => value.to_string(),
                }
            })
            .into_owned()
    }
}

impl Engine for MemoryEngine {
    fn t(&self, key: &str, options: &TOptions) -> String {
        self.inner.translate(key, options)
    }

    fn on(&self, events: &str, listener: Listener) -> ListenerId {
        self.inner.events.on(events, listener)
    }

    fn off(&self, event: &str, id: ListenerId) {
        self.inner.events.off(event, id);
    }

    fn on_store(&self, events: &str, listener: Listener) -> Option<ListenerId> {
        Some(self.inner.store_events.on(events, listener))
    }

    fn off_store(&self, event: &str, id: ListenerId) {
        self.inner.store_events.off(event, id);
    }

    fn is_initialized(&self) -> bool {
        self.inner.initialized.get()
    }

    fn language(&self) -> String {
        self.inner.language.borrow().clone()
    }

    fn load_namespaces(&self, namespaces: &[String]) {
        let mut loaded = self.inner.loaded.borrow_mut();
        for ns in namespaces {
            if !loaded.contains(ns) {
                log::debug!("Loading namespace: {}", ns);
                loaded.push(ns.clone());
            }
        }
    }

    fn add_resource_bundle(&self, lng: &str, ns: &str, bundle: Value, deep: bool, overwrite: bool) {
        {
            let mut store = self.inner.store.borrow_mut();
            let slot = store
                .entry(lng.to_string())
                .or_default()
                .entry(ns.to_string())
                .or_insert_with(|| Value::Object(Map::new()));

            match (deep, overwrite) {
                (true, true) => deep_merge(slot, bundle),
                (true, false) => deep_merge_keep(slot, bundle),
                (false, _) => match (slot, bundle) {
                    (Value::Object(existing), Value::Object(incoming)) => {
                        for (key, value) in incoming {
                            existing.insert(key, value);
                        }
                    }
                    (slot, bundle) => *slot = bundle,
                },
            }
        }
        self.inner.store_events.emit("added");
    }

    fn get_fixed_t(&self, lng: Option<&str>, namespaces: &[String]) -> FixedT {
        let inner = self.inner.clone();
        let lng = lng.map(str::to_string);
        let namespaces = namespaces.to_vec();

        Rc::new(move |key: &str, options: &TOptions| {
            let mut options = options.clone();
            if let Some(lng) = &lng {
                options
                    .entry("lng")
                    .or_insert_with(|| Value::String(lng.clone()));
            }
            if !namespaces.is_empty() {
                options
                    .entry("ns")
                    .or_insert_with(|| Value::from(namespaces.clone()));
            }
            inner.translate(key, &options)
        })
    }

    fn default_ns(&self) -> Namespaces {
        self.inner.default_ns.clone()
    }

    fn ns_separator(&self) -> String {
        self.inner.ns_separator.clone()
    }

    fn supports_sync_off(&self) -> bool {
        self.inner.sync_off
    }
}

/// Builder for [`MemoryEngine`]
pub struct MemoryEngineBuilder {
    language: String,
    fallback_lng: Option<String>,
    default_ns: Namespaces,
    ns_separator: String,
    key_separator: String,
    prefix: String,
    suffix: String,
    initialized: bool,
    sync_off: bool,
    bundles: Vec<(String, String, Value)>,
}

impl Default for MemoryEngineBuilder {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            fallback_lng: None,
            default_ns: Namespaces::default(),
            ns_separator: ":".to_string(),
            key_separator: ".".to_string(),
            prefix: "{{".to_string(),
            suffix: "}}".to_string(),
            initialized: true,
            sync_off: true,
            bundles: Vec::new(),
        }
    }
}

impl MemoryEngineBuilder {
    pub fn language(mut self, lng: &str) -> Self {
        self.language = lng.to_string();
        self
    }

    pub fn fallback_language(mut self, lng: &str) -> Self {
        self.fallback_lng = Some(lng.to_string());
        self
    }

    pub fn default_ns(mut self, ns: impl Into<Namespaces>) -> Self {
        self.default_ns = ns.into();
        self
    }

    pub fn ns_separator(mut self, separator: &str) -> Self {
        self.ns_separator = separator.to_string();
        self
    }

    pub fn key_separator(mut self, separator: &str) -> Self {
        self.key_separator = separator.to_string();
        self
    }

    pub fn interpolation(mut self, prefix: &str, suffix: &str) -> Self {
        self.prefix = prefix.to_string();
        self.suffix = suffix.to_string();
        self
    }

    /// Start initialized (default) or wait for [`MemoryEngine::init`]
    pub fn initialized(mut self, initialized: bool) -> Self {
        self.initialized = initialized;
        self
    }

    /// Report that listeners must not unsubscribe from inside a dispatch
    pub fn deferred_off(mut self) -> Self {
        self.sync_off = false;
        self
    }

    pub fn resource_bundle(mut self, lng: &str, ns: &str, bundle: Value) -> Self {
        self.bundles.push((lng.to_string(), ns.to_string(), bundle));
        self
    }

    pub fn build(self) -> MemoryEngine {
        let mut store: Store = HashMap::new();
        for (lng, ns, bundle) in self.bundles {
            let slot = store
                .entry(lng)
                .or_default()
                .entry(ns)
                .or_insert_with(|| Value::Object(Map::new()));
            deep_merge(slot, bundle);
        }

        MemoryEngine {
            inner: Rc::new(Inner {
                language: RefCell::new(self.language),
                fallback_lng: self.fallback_lng,
                default_ns: self.default_ns,
                ns_separator: self.ns_separator,
                key_separator: self.key_separator,
                prefix: self.prefix,
                suffix: self.suffix,
                initialized: Cell::new(self.initialized),
                sync_off: self.sync_off,
                store: RefCell::new(store),
                loaded: RefCell::new(Vec::new()),
                events: EventEmitter::new(),
                store_events: EventEmitter::new(),
            }),
        }
    }
}
