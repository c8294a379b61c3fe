//! Core module - Errors, adapter configuration, and common types

mod config;
mod error;
mod types;

pub use config::{AdapterOptions, ComponentNamespace, NamespaceFn};
pub use error::{Error, Result};
pub use types::{deep_merge, deep_merge_keep, Namespaces, TOptions};
