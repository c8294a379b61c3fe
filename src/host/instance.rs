//! Component definitions and live component instances

use crate::core::TOptions;
use crate::i18n::{logger, I18n, I18nContext, I18nOptions};
use std::cell::{Cell, OnceCell};
use std::rc::Rc;

/// Static description of a component, shared by all its instances
#[derive(Clone, Default)]
pub struct ComponentDefinition {
    /// Declared component name
    pub name: Option<String>,
    /// Tag the component was registered under
    pub tag: Option<String>,
    /// Explicit root adapter; wins over the parent's
    pub i18n: Option<Rc<I18n>>,
    pub i18n_options: Option<I18nOptions>,
    /// JSON documents keyed by language, merged into this component's namespace
    pub inline_resources: Vec<String>,
}

impl ComponentDefinition {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub fn with_i18n(mut self, i18n: &Rc<I18n>) -> Self {
        self.i18n = Some(i18n.clone());
        self
    }

    pub fn with_i18n_options(mut self, options: I18nOptions) -> Self {
        self.i18n_options = Some(options);
        self
    }

    pub fn with_inline_resource(mut self, json: &str) -> Self {
        self.inline_resources.push(json.to_string());
        self
    }
}

/// A live component
pub struct ComponentInstance {
    definition: Rc<ComponentDefinition>,
    parent: Option<Rc<ComponentInstance>>,
    i18n: OnceCell<I18nContext>,
    alive: Cell<bool>,
    renders: Cell<u64>,
}

impl ComponentInstance {
    pub(crate) fn new(
        definition: Rc<ComponentDefinition>,
        parent: Option<Rc<ComponentInstance>>,
    ) -> Rc<Self> {
        Rc::new(Self {
            definition,
            parent,
            i18n: OnceCell::new(),
            alive: Cell::new(true),
            renders: Cell::new(0),
        })
    }

    pub fn definition(&self) -> &ComponentDefinition {
        &self.definition
    }

    pub fn parent(&self) -> Option<&Rc<ComponentInstance>> {
        self.parent.as_ref()
    }

    /// The instance's i18n context; `None` when absent or once destroyed
    pub fn i18n(&self) -> Option<&I18nContext> {
        if self.alive.get() {
            self.i18n.get()
        } else {
            None
        }
    }

    pub(crate) fn attach_i18n(&self, context: I18nContext) {
        if self.i18n.set(context).is_err() {
            logger::warn("i18n context already attached to this component");
        }
    }

    /// Translate through this instance's bound translator
    pub fn t(&self, key: &str, options: &TOptions) -> String {
        match self.i18n() {
            Some(context) => context.translator().translate(key, options),
            None => {
                logger::warn("No i18n instance found in the component");
                key.to_string()
            }
        }
    }

    /// Schedule a re-render; ignored once destroyed
    pub fn force_update(&self) {
        if self.alive.get() {
            self.renders.set(self.renders.get() + 1);
        }
    }

    /// Number of forced re-renders so far
    pub fn render_count(&self) -> u64 {
        self.renders.get()
    }

    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    pub fn destroy(&self) {
        if !self.alive.replace(false) {
            return;
        }
        if let Some(context) = self.i18n.get() {
            context.release();
        }
    }
}

impl Drop for ComponentInstance {
    fn drop(&mut self) {
        self.destroy();
    }
}
