//! Diagnostics for misuse of the adapter
//!
//! Nothing here ever fails; messages go to the `log` facade under the
//! `i18n_bridge` target.

const TARGET: &str = "i18n_bridge";

pub fn warn(message: &str) {
    log::warn!(target: TARGET, "[i18n-bridge warn]: {}", message);
}

pub fn deprecate(message: &str) {
    log::warn!(target: TARGET, "[i18n-bridge deprecated]: {}", message);
}
