//! `i18next` functional component
//!
//! Renders a translation whose placeholders are filled with the caller's child
//! nodes instead of strings. A numeric placeholder picks a child by position;
//! any other placeholder picks the first child whose `place` attribute matches.
//!
//! ```text
//! "Hello #$?0?$#, you have #$?count?$# items"
//!   + [<b>Bob</b>, <i place="count">5</i>]
//!   = <span>Hello <b>Bob</b>, you have <i place="count">5</i> items</span>
//! ```

use crate::core::{Error, Result, TOptions};
use crate::host::{FunctionalComponent, RenderContext, VNode};
use crate::i18n::logger;
use regex::Regex;
use serde::Deserialize;
use serde_json::{json, Value};

/// Placeholder delimiters forced on the engine while rendering
pub const PLACEHOLDER_PREFIX: &str = "#$?";
pub const PLACEHOLDER_SUFFIX: &str = "?$#";

const DEFAULT_TAG: &str = "span";

fn default_tag() -> String {
    DEFAULT_TAG.to_string()
}

#[derive(Debug, Deserialize)]
struct Props {
    #[serde(default = "default_tag")]
    tag: String,
    path: String,
    #[serde(default)]
    options: Option<TOptions>,
}

fn parse_props(props: &TOptions) -> Result<Props> {
    serde_json::from_value(Value::Object(props.clone()))
        .map_err(|e| Error::InvalidProps(format!("i18next: {}", e)))
}

pub struct Interpolate;

impl Interpolate {
    pub const NAME: &'static str = "i18next";
}

/// Split `text` around placeholder matches: literals at even indexes, tokens at odd ones
pub fn split_placeholders<'a>(text: &'a str, pattern: &Regex) -> Vec<&'a str> {
    let mut parts = Vec::new();
    let mut last = 0;
    for caps in pattern.captures_iter(text) {
        let (Some(whole), Some(token)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        parts.push(&text[last..whole.start()]);
        parts.push(token.as_str());
        last = whole.end();
    }
    parts.push(&text[last..]);
    parts
}

/// Index given by the token's leading integer (`1e1` -> 1, `.5` -> none)
fn leading_index(token: &str) -> Option<usize> {
    let (negative, rest) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let index = rest[..end].parse::<usize>().ok()?;
    if negative && index != 0 {
        return None;
    }
    Some(index)
}

/// Child referenced by a placeholder token
fn resolve_slot<'c>(token: &str, children: &'c [VNode]) -> Option<&'c VNode> {
    let place = token.trim();
    match place.parse::<f64>() {
        Ok(number) if number.is_finite() => children.get(leading_index(place)?),
        _ => children.iter().find(|child| child.attr("place") == Some(place)),
    }
}

/// Interleave literal text with the children the placeholders point at.
/// Empty literals and unresolved placeholders produce nothing.
pub fn assemble(parts: &[&str], children: &[VNode]) -> Vec<VNode> {
    parts
        .iter()
        .enumerate()
        .filter_map(|(index, part)| {
            if index % 2 == 0 {
                (!part.is_empty()).then(|| VNode::text(*part))
            } else {
                resolve_slot(part, children).cloned()
            }
        })
        .collect()
}

impl FunctionalComponent for Interpolate {
    fn render(&self, ctx: RenderContext<'_>) -> VNode {
        let RenderContext {
            props,
            data,
            children,
            parent,
        } = ctx;

        let props = match parse_props(props) {
            Ok(props) => props,
            Err(e) => {
                logger::warn(&e.to_string());
                let tag = props.get("tag").and_then(Value::as_str).unwrap_or(DEFAULT_TAG);
                return VNode::h(tag, data, children);
            }
        };

        let Some(context) = parent.i18n() else {
            return VNode::h(&props.tag, data, children);
        };
        let i18n = context.i18n();

        let mut options = props.options.unwrap_or_default();
        options.insert(
            "interpolation".to_string(),
            json!({ "prefix": PLACEHOLDER_PREFIX, "suffix": PLACEHOLDER_SUFFIX }),
        );
        let format = i18n.t(&props.path, &options);

        let pattern = i18n
            .engine()
            .interpolation_pattern(PLACEHOLDER_PREFIX, PLACEHOLDER_SUFFIX);
        let nodes = assemble(&split_placeholders(&format, &pattern), &children);

        VNode::h(&props.tag, data, nodes)
    }
}
