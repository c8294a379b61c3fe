//! Explicit reactive value holder
//!
//! Components subscribe to the holder instead of relying on implicit
//! dependency tracking; every `set` notifies all subscribers.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub type SubscriptionId = u64;

pub type Subscriber<T> = Rc<dyn Fn(&T)>;

pub struct Observable<T> {
    value: RefCell<T>,
    next_id: Cell<SubscriptionId>,
    subscribers: RefCell<Vec<(SubscriptionId, Subscriber<T>)>>,
    destroyed: Cell<bool>,
}

impl<T: Clone> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            next_id: Cell::new(0),
            subscribers: RefCell::new(Vec::new()),
            destroyed: Cell::new(false),
        }
    }

    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Store `value` and notify subscribers. A destroyed holder ignores writes.
    pub fn set(&self, value: T) {
        if self.destroyed.get() {
            log::debug!("Ignoring write to a destroyed holder");
            return;
        }
        *self.value.borrow_mut() = value.clone();

        let snapshot: Vec<Subscriber<T>> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, s)| s.clone())
            .collect();
        for subscriber in snapshot {
            subscriber(&value);
        }
    }

    pub fn subscribe(&self, subscriber: Subscriber<T>) -> SubscriptionId {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.subscribers.borrow_mut().push((id, subscriber));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.borrow_mut().retain(|(sid, _)| *sid != id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// New holder with `value`, taking over the current subscribers and their ids
    pub fn successor(&self, value: T) -> Self {
        Self {
            value: RefCell::new(value),
            next_id: Cell::new(self.next_id.get()),
            subscribers: RefCell::new(self.subscribers.borrow().clone()),
            destroyed: Cell::new(false),
        }
    }

    pub fn destroy(&self) {
        self.destroyed.set(true);
        self.subscribers.borrow_mut().clear();
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }
}
