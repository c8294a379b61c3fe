//! Key prefix resolution

use super::InstanceOptions;
use std::borrow::Cow;

/// Prefix `key` with the configured `key_prefix` and a dot.
///
/// Keys that already name a namespace (contain `ns_separator`) and instances
/// without a prefix are returned unchanged.
pub fn resolve_key<'a>(
    options: Option<&InstanceOptions>,
    ns_separator: &str,
    key: &'a str,
) -> Cow<'a, str> {
    match options.and_then(|o| o.key_prefix.as_deref()) {
        Some(prefix) if !prefix.is_empty() && !key.contains(ns_separator) => {
            Cow::Owned(format!("{}.{}", prefix, key))
        }
        _ => Cow::Borrowed(key),
    }
}
