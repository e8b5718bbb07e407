//! Nodes of a compiled template

/// One node of the element tree
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Literal text, emitted verbatim
    Text(String),

    /// `{{path}}`: interpolated and HTML-escaped
    Variable(String),

    /// `{{{path}}}` or `{{&path}}`: interpolated without escaping
    LiteralVariable(String),

    /// `{{#path}}...{{/path}}`
    Section { path: String, children: Vec<Element> },

    /// `{{^path}}...{{/path}}`
    InvertedSection { path: String, children: Vec<Element> },

    /// `{{>name}}`, bound to a registry slot when parsed
    Partial(PartialRef),
}

/// A `{{>name}}` reference resolved at parse time
///
/// Only the parser creates these, so a reference always points at a slot of
/// the registry owned by the template it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialRef {
    name: String,
    slot: usize,
}

impl PartialRef {
    pub(crate) fn new(name: impl Into<String>, slot: usize) -> Self {
        Self {
            name: name.into(),
            slot,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn slot(&self) -> usize {
        self.slot
    }
}
