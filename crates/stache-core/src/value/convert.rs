//! Conversions into [`Value`]

use super::{Map, Value};
use crate::error::{Result, TemplateError};
use serde::Serialize;
use std::sync::Arc;

impl Value {
    /// Normalise any serializable value through its serde representation
    ///
    /// Structs and maps become `Map`, sequences and tuples become `Seq`, unit
    /// enum variants become `Text`.
    pub fn from_serialize<T: Serialize + ?Sized>(data: &T) -> Result<Self> {
        serde_json::to_value(data)
            .map(Value::from)
            .map_err(|e| TemplateError::Data(e.to_string()))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Int(i64::from(n))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        i64::try_from(n).map_or(Value::Float(n as f64), Value::Int)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or(Value::Float(n as f64), Value::Int)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(f64::from(x))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(Arc::from(s))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        items.into_iter().collect()
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(Arc::new(map))
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::Seq(iter.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::from(s),
            serde_json::Value::Array(items) => items.into_iter().collect(),
            serde_json::Value::Object(object) => {
                Value::from(object.into_iter().map(|(k, v)| (k, Value::from(v))).collect::<Map>())
            }
        }
    }
}

impl From<toml::Value> for Value {
    fn from(data: toml::Value) -> Self {
        match data {
            toml::Value::String(s) => Value::from(s),
            toml::Value::Integer(i) => Value::Int(i),
            toml::Value::Float(f) => Value::Float(f),
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::Datetime(dt) => Value::from(dt.to_string()),
            toml::Value::Array(items) => items.into_iter().collect(),
            toml::Value::Table(table) => {
                Value::from(table.into_iter().map(|(k, v)| (k, Value::from(v))).collect::<Map>())
            }
        }
    }
}
