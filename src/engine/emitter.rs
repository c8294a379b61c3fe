//! Event emitter keyed by event name

use super::{Listener, ListenerId};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Multi-event emitter
///
/// Listeners are cloned out before dispatch, so a listener may subscribe or
/// unsubscribe (itself included) while it runs.
#[derive(Default)]
pub struct EventEmitter {
    next_id: Cell<ListenerId>,
    listeners: RefCell<HashMap<String, Vec<(ListenerId, Listener)>>>,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` under every space-separated event name; one id covers all of them
    pub fn on(&self, events: &str, listener: Listener) -> ListenerId {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);

        let mut listeners = self.listeners.borrow_mut();
        for event in events.split_whitespace() {
            listeners
                .entry(event.to_string())
                .or_default()
                .push((id, listener.clone()));
        }
        id
    }

    pub fn off(&self, event: &str, id: ListenerId) {
        if let Some(list) = self.listeners.borrow_mut().get_mut(event) {
            list.retain(|(listener_id, _)| *listener_id != id);
        }
    }

    pub fn emit(&self, event: &str) {
        let snapshot: Vec<Listener> = match self.listeners.borrow().get(event) {
            Some(list) => list.iter().map(|(_, l)| l.clone()).collect(),
            None => return,
        };

        for listener in snapshot {
            listener(event);
        }
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.borrow().get(event).map_or(0, Vec::len)
    }
}
