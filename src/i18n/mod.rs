//! Root adapter
//!
//! [`I18n`] wraps an engine handle for the whole application. It listens to
//! the engine's language/resource events and republishes them as a
//! `loaded_at` timestamp that component instances subscribe to.

mod context;
mod keys;
pub mod logger;
mod mixin;
mod observable;

pub use context::{I18nContext, I18nOptions, InstanceOptions, Translator};
pub use keys::resolve_key;
pub use mixin::{default_component_namespace, InstallMixin};
pub use observable::{Observable, Subscriber, SubscriptionId};

use crate::component::Interpolate;
use crate::core::{AdapterOptions, Result, TOptions};
use crate::directives::{TranslateDirective, WaitDirective};
use crate::engine::{Engine, Listener, ListenerId};
use crate::host::{Framework, Plugin, Scheduler};
use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::rc::Rc;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone, Copy)]
enum Channel {
    Engine,
    Store,
}

/// Root adapter, created once per application
pub struct I18n {
    engine: Rc<dyn Engine>,
    options: AdapterOptions,
    scheduler: Rc<dyn Scheduler>,
    data: RefCell<Rc<Observable<DateTime<Utc>>>>,
    listeners: RefCell<Vec<(Channel, String, ListenerId)>>,
}

impl I18n {
    pub fn new(
        engine: Rc<dyn Engine>,
        options: AdapterOptions,
        scheduler: Rc<dyn Scheduler>,
    ) -> Rc<Self> {
        let i18n = Rc::new(Self {
            engine,
            options,
            scheduler,
            data: RefCell::new(Rc::new(Observable::new(Utc::now()))),
            listeners: RefCell::new(Vec::new()),
        });

        let weak = Rc::downgrade(&i18n);
        let on_changed: Listener = Rc::new(move |event: &str| {
            if let Some(i18n) = weak.upgrade() {
                i18n.on_changed(event);
            }
        });

        let i18n_events = i18n.options.i18n_events();
        if !i18n_events.is_empty() {
            let id = i18n.engine.on(&i18n.options.bind_i18n, on_changed.clone());
            i18n.track(Channel::Engine, &i18n_events, id);
        }

        let store_events = i18n.options.store_events();
        if !store_events.is_empty() {
            match i18n.engine.on_store(&i18n.options.bind_store, on_changed) {
                Some(id) => i18n.track(Channel::Store, &store_events, id),
                None => log::debug!("Engine has no resource store events"),
            }
        }

        log::info!("i18n adapter v{} ready (language: {})", VERSION, i18n.engine.language());
        i18n
    }

    fn track(&self, channel: Channel, events: &[&str], id: ListenerId) {
        let mut listeners = self.listeners.borrow_mut();
        for event in events {
            listeners.push((channel, event.to_string(), id));
        }
    }

    fn on_changed(&self, event: &str) {
        log::debug!("Engine event '{}', refreshing translations", event);
        self.set_loaded_at(Utc::now());
    }

    pub fn engine(&self) -> &Rc<dyn Engine> {
        &self.engine
    }

    pub fn options(&self) -> &AdapterOptions {
        &self.options
    }

    pub fn scheduler(&self) -> &Rc<dyn Scheduler> {
        &self.scheduler
    }

    /// Translate through the engine without any component configuration
    pub fn t(&self, key: &str, options: &TOptions) -> String {
        self.engine.t(key, options)
    }

    pub fn language(&self) -> String {
        self.engine.language()
    }

    fn holder(&self) -> Rc<Observable<DateTime<Utc>>> {
        self.data.borrow().clone()
    }

    /// When translations last changed
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.holder().get()
    }

    /// Publish a new timestamp to every subscribed instance
    pub fn set_loaded_at(&self, at: DateTime<Utc>) {
        self.holder().set(at);
    }

    /// Replace the reactive data holder.
    ///
    /// The new holder keeps the current subscribers; the old one is destroyed
    /// on the next tick so renders already in flight can still read it.
    pub fn reset_data(&self, loaded_at: DateTime<Utc>) {
        let successor = Rc::new(self.holder().successor(loaded_at));
        let previous = self.data.replace(successor.clone());
        self.scheduler.next_tick(Box::new(move || previous.destroy()));
        log::debug!("Replaced reactive data holder");
        successor.set(loaded_at);
    }

    /// The live reactive data holder
    pub fn data(&self) -> Rc<Observable<DateTime<Utc>>> {
        self.holder()
    }

    pub fn subscribe(&self, subscriber: Subscriber<DateTime<Utc>>) -> SubscriptionId {
        self.holder().subscribe(subscriber)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.holder().unsubscribe(id);
    }
}

impl Drop for I18n {
    fn drop(&mut self) {
        for (channel, event, id) in self.listeners.get_mut().drain(..) {
            match channel {
                Channel::Engine => self.engine.off(&event, id),
                Channel::Store => self.engine.off_store(&event, id),
            }
        }
    }
}

/// Registers the mixin, the `i18next` component and the `t` / `waitForT` directives
pub struct I18nPlugin;

impl Plugin for I18nPlugin {
    fn name(&self) -> &'static str {
        "i18n-bridge"
    }

    fn install(&self, framework: &mut Framework) {
        framework.mixin(Rc::new(InstallMixin));
        framework.component(Interpolate::NAME, Rc::new(Interpolate));
        framework.directive(TranslateDirective::NAME, Rc::new(TranslateDirective));
        framework.directive(WaitDirective::NAME, Rc::new(WaitDirective));
    }
}

/// Install the adapter into a framework registry; fails if already installed
pub fn install(framework: &mut Framework) -> Result<()> {
    framework.use_plugin(&I18nPlugin)
}
