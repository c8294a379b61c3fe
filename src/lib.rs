//! i18n-bridge library
//!
//! Binds an i18n engine to a component framework: a root adapter that
//! republishes engine events, per-component translation contexts, the
//! `t` / `waitForT` directives and the `i18next` interpolation component.

pub mod component;
pub mod core;
pub mod directives;
pub mod engine;
pub mod host;
pub mod i18n;

#[cfg(test)]
mod test_support;

pub use crate::component::Interpolate;
pub use crate::core::{AdapterOptions, Error, Result, TOptions};
pub use crate::directives::BindingValue;
pub use crate::engine::{Engine, MemoryEngine};
pub use crate::host::{ComponentDefinition, ComponentInstance, Framework};
pub use crate::i18n::{install, I18n, I18nOptions, I18nPlugin};
