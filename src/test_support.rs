//! Test helpers: a thread-local capture of warnings emitted through `log`

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::sync::Once;

thread_local! {
    static CAPTURED: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            CAPTURED.with(|captured| captured.borrow_mut().push(record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

/// Run `f` and return its result with the warnings it logged on this thread
pub fn capture_warnings<R>(f: impl FnOnce() -> R) -> (R, Vec<String>) {
    INIT.call_once(|| {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(LevelFilter::Warn);
    });

    CAPTURED.with(|captured| captured.borrow_mut().clear());
    let result = f();
    let logs = CAPTURED.with(|captured| captured.borrow_mut().drain(..).collect());
    (result, logs)
}
