//! Deferred work: next-tick callbacks and timers

use std::cell::{Cell, RefCell};
use std::time::Duration;

/// Deferred task; the host runs everything on a single UI thread
pub type Task = Box<dyn FnOnce()>;

pub trait Scheduler {
    /// Run `task` after the current update cycle
    fn next_tick(&self, task: Task);

    /// Run `task` once `delay` has elapsed
    fn set_timeout(&self, delay: Duration, task: Task);
}

/// Scheduler backed by tokio local tasks
///
/// Tasks are `!Send`, so this must be used from inside a
/// [`tokio::task::LocalSet`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn next_tick(&self, task: Task) {
        tokio::task::spawn_local(async move {
            tokio::task::yield_now().await;
            task();
        });
    }

    fn set_timeout(&self, delay: Duration, task: Task) {
        tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }
}

struct Pending {
    due: Duration,
    seq: u64,
    task: Task,
}

/// Scheduler driven by a virtual clock
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<Duration>,
    seq: Cell<u64>,
    queue: RefCell<Vec<Pending>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, due: Duration, task: Task) {
        let seq = self.seq.get() + 1;
        self.seq.set(seq);
        self.queue.borrow_mut().push(Pending { due, seq, task });
    }

    /// Time elapsed on the virtual clock
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Run everything that is already due, including next-tick work
    pub fn flush(&self) {
        self.advance(Duration::ZERO);
    }

    /// Move the clock forward and run due tasks in deadline order
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by;
        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                let due = queue
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due <= target)
                    .min_by_key(|(_, p)| (p.due, p.seq))
                    .map(|(index, _)| index);
                due.map(|index| queue.remove(index))
            };

            let Some(pending) = next else { break };
            if pending.due > self.now.get() {
                self.now.set(pending.due);
            }
            (pending.task)();
        }
        self.now.set(target);
    }
}

impl Scheduler for ManualScheduler {
    fn next_tick(&self, task: Task) {
        self.push(self.now.get(), task);
    }

    fn set_timeout(&self, delay: Duration, task: Task) {
        self.push(self.now.get() + delay, task);
    }
}
