//! Elements touched by directives and virtual nodes produced by render functions

use std::collections::BTreeMap;

/// A mounted element as seen by directives
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    text_content: String,
    hidden: bool,
    mutations: u32,
    /// Language last applied by the `t` directive
    pub(crate) i18n_language: Option<String>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn text_content(&self) -> &str {
        &self.text_content
    }

    pub fn set_text_content(&mut self, text: String) {
        self.text_content = text;
        self.mutations += 1;
    }

    pub fn hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
        self.mutations += 1;
    }

    /// Number of writes made to this element
    pub fn mutations(&self) -> u32 {
        self.mutations
    }

    pub fn i18n_language(&self) -> Option<&str> {
        self.i18n_language.as_deref()
    }
}

/// Virtual node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VNode {
    Text(String),
    Element(ElementNode),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementNode {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub children: Vec<VNode>,
}

impl VNode {
    pub fn text(text: impl Into<String>) -> Self {
        VNode::Text(text.into())
    }

    /// Build an element node (the render function's `h`)
    pub fn h(tag: &str, attrs: BTreeMap<String, String>, children: Vec<VNode>) -> Self {
        VNode::Element(ElementNode {
            tag: tag.to_string(),
            attrs,
            children,
        })
    }

    /// Element node with a single text child
    pub fn element(tag: &str, text: &str) -> Self {
        Self::h(tag, BTreeMap::new(), vec![VNode::text(text)])
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        if let VNode::Element(node) = &mut self {
            node.attrs.insert(name.to_string(), value.to_string());
        }
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            VNode::Element(node) => node.attrs.get(name).map(String::as_str),
            VNode::Text(_) => None,
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element(node) => &node.children,
            VNode::Text(_) => &[],
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        match self {
            VNode::Text(text) => text.clone(),
            VNode::Element(node) => node.children.iter().map(VNode::text_content).collect(),
        }
    }
}
