//! Lookup frames used while rendering
//!
//! A [`Context`] wraps the value currently in scope and borrows the frame that
//! encloses it. Frames are never mutated; entering a section, an iteration
//! item or an enumeration value pushes a new frame on the stack.

use crate::value::Value;

/// Extra names a frame answers before ordinary lookup
#[derive(Debug, Clone, Copy)]
enum Frame {
    Plain,
    /// One item of a section iterating a collection
    Item {
        first: bool,
        last: bool,
        index: usize,
    },
    /// An enumeration value: variant names resolve to booleans
    Variant,
}

/// One frame of the lookup chain
#[derive(Debug)]
pub struct Context<'p> {
    value: Value,
    parent: Option<&'p Context<'p>>,
    frame: Frame,
}

impl Context<'static> {
    /// Create a root frame for a render invocation
    pub fn new(value: Value) -> Self {
        Self {
            value,
            parent: None,
            frame: Frame::Plain,
        }
    }
}

impl<'p> Context<'p> {
    /// The value held by this frame
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn parent(&self) -> Option<&'p Context<'p>> {
        self.parent
    }

    /// Push a frame for a section body
    pub fn child(&self, value: Value) -> Context<'_> {
        Context {
            value,
            parent: Some(self),
            frame: Frame::Plain,
        }
    }

    /// Push a frame for one item of an iteration
    ///
    /// The frame answers `first`, `last`, `index` and `index1` itself,
    /// shadowing anything of the same name further up.
    pub fn item_child(&self, value: Value, first: bool, last: bool, index: usize) -> Context<'_> {
        Context {
            value,
            parent: Some(self),
            frame: Frame::Item { first, last, index },
        }
    }

    /// Push a frame for an enumeration value
    pub fn enum_child(&self, value: Value) -> Context<'_> {
        Context {
            value,
            parent: Some(self),
            frame: Frame::Variant,
        }
    }

    /// Resolve a dotted path
    ///
    /// Only the first segment falls back to enclosing frames; later segments
    /// are looked up strictly on the intermediate result. Returns `None` when
    /// nothing matches, which is not an error.
    pub fn resolve(&self, path: &str) -> Option<Value> {
        if let Some(value) = self.frame_override(path) {
            return Some(value);
        }
        if path == "." {
            return Some(self.value.clone());
        }
        match path.split_once('.') {
            None => self.resolve_segment(path),
            Some((head, rest)) => {
                let mut current = self.resolve_segment(head)?;
                for segment in rest.split('.') {
                    current = current.lookup(segment)?;
                }
                Some(current)
            }
        }
    }

    fn resolve_segment(&self, name: &str) -> Option<Value> {
        self.value
            .lookup(name)
            .or_else(|| self.parent.and_then(|parent| parent.resolve(name)))
    }

    fn frame_override(&self, name: &str) -> Option<Value> {
        match self.frame {
            Frame::Plain => None,
            Frame::Item { first, last, index } => match name {
                "first" => Some(Value::Bool(first)),
                "last" => Some(Value::Bool(last)),
                "index" => Some(Value::from(index)),
                "index1" => Some(Value::from(index + 1)),
                _ => None,
            },
            Frame::Variant => match &self.value {
                Value::Enum(value) if value.variant() == name => Some(Value::Bool(true)),
                Value::Enum(value) if value.variants().iter().any(|v| *v == name) => {
                    Some(Value::Bool(false))
                }
                _ => None,
            },
        }
    }
}
