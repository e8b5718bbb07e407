//! Data model that templates are rendered against
//!
//! Every piece of data bound to a template is normalised into a [`Value`].
//! Plain data (maps, lists, scalars) converts directly; application types
//! either implement one of the capability traits below or go through serde
//! with [`Value::from_serialize`].
//!
//! ## Kinds
//!
//! - `Null`: present but null. Stops lookup, renders nothing
//! - `Bool`, `Int`, `Float`, `Text`: scalars
//! - `Seq`, `Map`: collections, iterated by sections
//! - `Enum`: a value of an enumeration ([`Enumeration`])
//! - `Object`: a structured record exposing named fields ([`Fields`])
//! - `Stream`: an open-ended sequence produced on demand ([`StreamSource`])

mod convert;

use futures::stream::BoxStream;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// String-keyed map preserving insertion order
pub type Map = IndexMap<String, Value>;

/// A dynamically typed data value
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(Arc<str>),
    Seq(Arc<[Value]>),
    Map(Arc<Map>),
    Enum(Arc<dyn Enumeration>),
    Object(Arc<dyn Fields>),
    Stream(Arc<dyn StreamSource>),
}

/// Named field access for structured records
///
/// Instance fields are searched first, then type-level fields, so a record
/// can expose constants shared by every instance.
pub trait Fields: fmt::Debug + Send + Sync {
    /// Look up an instance field by exact name
    fn field(&self, name: &str) -> Option<Value>;

    /// Look up a type-level field by exact name
    fn static_field(&self, _name: &str) -> Option<Value> {
        None
    }

    /// Text form used when the record itself is interpolated
    fn text(&self) -> String {
        format!("{:?}", self)
    }
}

/// A value of an enumeration type
///
/// Inside a section over an enumeration value, the name of the current
/// variant resolves to `true` and every other variant name to `false`.
pub trait Enumeration: fmt::Debug + Send + Sync {
    /// Name of this value's variant
    fn variant(&self) -> &str;

    /// Names of all variants of the enumeration, in declaration order
    fn variants(&self) -> &[&str];

    /// Additional fields carried by the value
    fn field(&self, _name: &str) -> Option<Value> {
        None
    }
}

/// A sequence whose length is not known until it has been consumed
///
/// Each call to `open` starts a fresh pass so that a compiled template can be
/// rendered more than once against the same data.
pub trait StreamSource: fmt::Debug + Send + Sync {
    fn open(&self) -> BoxStream<'_, Value>;
}

impl Value {
    /// Wrap a structured record
    pub fn object(fields: impl Fields + 'static) -> Self {
        Value::Object(Arc::new(fields))
    }

    /// Wrap an enumeration value
    pub fn enumeration(value: impl Enumeration + 'static) -> Self {
        Value::Enum(Arc::new(value))
    }

    /// Wrap an open-ended sequence
    pub fn stream(source: impl StreamSource + 'static) -> Self {
        Value::Stream(Arc::new(source))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(&**s),
            _ => None,
        }
    }

    /// Text form for interpolation, `None` for `Null`
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Text(s) => Some(s.to_string()),
            Value::Int(i) => Some(i.to_string()),
            other => Some(other.to_string()),
        }
    }

    /// Look up a single name directly on this value
    ///
    /// This never consults enclosing context frames; see
    /// [`Context::resolve`](crate::context::Context::resolve) for that.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        match self {
            Value::Null => None,
            Value::Map(map) => map.get(name).cloned(),
            Value::Seq(items) => match name {
                "size" | "length" => Some(Value::from(items.len())),
                _ => name
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| items.get(index).cloned()),
            },
            Value::Text(s) if name == "length" => Some(Value::from(s.chars().count())),
            Value::Enum(value) => match name {
                "name" => Some(Value::from(value.variant())),
                "ordinal" => value
                    .variants()
                    .iter()
                    .position(|v| *v == value.variant())
                    .map(Value::from),
                _ => value.field(name),
            },
            Value::Object(fields) => fields.field(name).or_else(|| fields.static_field(name)),
            _ => None,
        }
    }
}

/// A key/value pair produced when a section iterates over a map
#[derive(Debug)]
pub(crate) struct Entry {
    pub(crate) key: String,
    pub(crate) value: Value,
}

impl Fields for Entry {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "key" => Some(Value::from(self.key.as_str())),
            "value" => Some(self.value.clone()),
            _ => None,
        }
    }

    fn text(&self) -> String {
        format!("{}={}", self.key, self.value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => f.write_str(s),
            Value::Seq(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}={}", key, value)?;
                }
                f.write_str("}")
            }
            Value::Enum(value) => f.write_str(value.variant()),
            Value::Object(fields) => f.write_str(&fields.text()),
            Value::Stream(source) => write!(f, "{:?}", source),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Value::Seq(items) => f.debug_list().entries(items.iter()).finish(),
            Value::Map(map) => f.debug_map().entries(map.iter()).finish(),
            Value::Enum(value) => f.debug_tuple("Enum").field(value).finish(),
            Value::Object(fields) => f.debug_tuple("Object").field(fields).finish(),
            Value::Stream(source) => f.debug_tuple("Stream").field(source).finish(),
        }
    }
}

/// Structural equality for data, identity for trait objects
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => Arc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            (Value::Stream(a), Value::Stream(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
