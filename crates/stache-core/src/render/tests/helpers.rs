//! Shared test helpers for rendering tests

use crate::parser::Parser;
use crate::value::{Enumeration, Fields, StreamSource, Value};
use crate::Template;
use futures::channel::mpsc;
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use serde_json::json;

/// Parse with a parser that has no partial sources
pub(super) fn template(text: &str) -> Template {
    Parser::with_resolver(|name| {
        Err(crate::TemplateError::PartialNotFound {
            name: name.to_string(),
            reason: "no partials in this test".to_string(),
        })
    })
    .parse(text)
    .unwrap()
}

/// Parse and render in one step
pub(super) fn render(text: &str, data: &Value) -> String {
    template(text).render(data)
}

/// Render through the streaming path into a channel and collect the output
pub(super) fn render_streaming(template: &Template, data: &Value) -> String {
    let (mut tx, rx) = mpsc::unbounded::<char>();
    futures::executor::block_on(template.output_to(&mut tx, data)).unwrap();
    drop(tx);
    futures::executor::block_on(rx.collect::<String>())
}

/// Record with a single text field, like a minimal application type
#[derive(Debug)]
pub(super) struct TestClass {
    pub(super) aaa: String,
}

impl TestClass {
    pub(super) fn value(aaa: &str) -> Value {
        Value::object(TestClass {
            aaa: aaa.to_string(),
        })
    }
}

impl Fields for TestClass {
    fn field(&self, name: &str) -> Option<Value> {
        (name == "aaa").then(|| Value::from(self.aaa.as_str()))
    }
}

#[derive(Debug, Clone, Copy)]
pub(super) enum Colour {
    Red,
    Green,
    Blue,
}

impl Enumeration for Colour {
    fn variant(&self) -> &str {
        match self {
            Colour::Red => "RED",
            Colour::Green => "GREEN",
            Colour::Blue => "BLUE",
        }
    }

    fn variants(&self) -> &[&str] {
        &["RED", "GREEN", "BLUE"]
    }
}

/// Stream source yielding a fixed list of values on every pass
#[derive(Debug)]
pub(super) struct Items(pub(super) Vec<Value>);

impl StreamSource for Items {
    fn open(&self) -> BoxStream<'_, Value> {
        stream::iter(self.0.iter().cloned()).boxed()
    }
}

/// The data set used by the JSON interop checks
pub(super) fn json_data() -> Value {
    Value::from(json!({
        "a": "X",
        "b": 23,
        "c": true,
        "d": false,
        "e": [1, 2, 3],
        "f": "",
        "g": 0
    }))
}
