//! Per-component i18n state

use super::keys::resolve_key;
use super::observable::SubscriptionId;
use super::I18n;
use crate::core::{Namespaces, TOptions};
use crate::engine::FixedT;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cell::Cell;
use std::rc::Rc;

/// `i18nOptions` declared on a component definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct I18nOptions {
    /// Language override for this component's translator
    #[serde(default)]
    pub lng: Option<String>,
    /// Prefix applied to keys without a namespace
    #[serde(default)]
    pub key_prefix: Option<String>,
    /// Messages keyed by language, merged with the inline resources
    #[serde(default)]
    pub messages: Option<Map<String, Value>>,
    /// Namespaces to search; defaults to the engine's default namespaces
    #[serde(default)]
    pub namespaces: Option<Namespaces>,
}

/// Options resolved for one instance, inherited by its children
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceOptions {
    pub lng: Option<String>,
    pub key_prefix: Option<String>,
    /// Lookup order
    pub namespaces: Vec<String>,
}

/// Translate function bound to one instance's configuration
pub struct Translator {
    i18n: Rc<I18n>,
    options: Option<InstanceOptions>,
    fixed: Option<FixedT>,
}

impl Translator {
    pub(crate) fn new(i18n: &Rc<I18n>, options: Option<&InstanceOptions>) -> Self {
        let fixed = options.map(|o| i18n.engine().get_fixed_t(o.lng.as_deref(), &o.namespaces));
        Self {
            i18n: i18n.clone(),
            options: options.cloned(),
            fixed,
        }
    }

    pub fn translate(&self, key: &str, options: &TOptions) -> String {
        let separator = self.i18n.engine().ns_separator();
        let key = resolve_key(self.options.as_ref(), &separator, key);
        match &self.fixed {
            Some(fixed) => fixed(&*key, options),
            None => self.i18n.t(&*key, options),
        }
    }
}

/// i18n context attached to a component instance at creation
pub struct I18nContext {
    i18n: Rc<I18n>,
    namespace: String,
    options: Option<InstanceOptions>,
    translator: Translator,
    subscription: Cell<Option<SubscriptionId>>,
}

impl I18nContext {
    pub(crate) fn new(i18n: Rc<I18n>, namespace: String, options: Option<InstanceOptions>) -> Self {
        let translator = Translator::new(&i18n, options.as_ref());
        Self {
            i18n,
            namespace,
            options,
            translator,
            subscription: Cell::new(None),
        }
    }

    pub fn i18n(&self) -> &Rc<I18n> {
        &self.i18n
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn options(&self) -> Option<&InstanceOptions> {
        self.options.as_ref()
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub(crate) fn set_subscription(&self, id: SubscriptionId) {
        self.subscription.set(Some(id));
    }

    /// Stop receiving `loaded_at` updates
    pub(crate) fn release(&self) {
        if let Some(id) = self.subscription.take() {
            self.i18n.unsubscribe(id);
        }
    }
}
