//! Partial rendering

use super::helpers::render_streaming;
use super::*;
use crate::parser::Parser;
use crate::partial::{CharSink, Partial, Render, SinkFailed};
use crate::value::StreamSource;
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use serde_json::json;
use std::collections::HashMap;
use std::task::Poll;

fn parser_with(sources: &[(&str, &str)]) -> Parser {
    let sources: HashMap<String, String> = sources
        .iter()
        .map(|(name, text)| (name.to_string(), text.to_string()))
        .collect();
    Parser::with_resolver(move |name| {
        sources
            .get(name)
            .cloned()
            .ok_or_else(|| crate::TemplateError::PartialNotFound {
                name: name.to_string(),
                reason: "unknown".to_string(),
            })
    })
}

#[test]
fn test_partial_renders_with_current_context() {
    let parser = parser_with(&[("item", "<{{name}}>")]);
    let template = parser.parse("{{#items}}{{>item}}{{/items}}").unwrap();
    let data = Value::from(json!({"items": [{"name": "a"}, {"name": "b"}]}));
    assert_eq!(template.render(&data), "<a><b>");
}

#[test]
fn test_partial_sees_iteration_frame() {
    let parser = parser_with(&[("item", "{{index1}}.{{.}}{{^last}} {{/last}}")]);
    let template = parser.parse("{{#items}}{{>item}}{{/items}}").unwrap();
    let data = Value::from(json!({"items": ["x", "y"]}));
    assert_eq!(template.render(&data), "1.x 2.y");
}

#[test]
fn test_recursive_partial_terminates_depth_first() {
    let parser = parser_with(&[(
        "node",
        "({{name}}{{#children}}{{>node}}{{/children}})",
    )]);
    let template = parser.parse("{{>node}}").unwrap();
    let data = Value::from(json!({
        "name": "root",
        "children": [
            {"name": "a", "children": [{"name": "a1", "children": []}]},
            {"name": "b", "children": []}
        ]
    }));
    assert_eq!(template.render(&data), "(root(a(a1))(b))");
}

#[test]
fn test_partials_shared_between_templates_of_one_parser() {
    let parser = parser_with(&[("footer", "-- {{site}}")]);
    let first = parser.parse("A {{>footer}}").unwrap();
    let second = parser.parse("B {{>footer}}").unwrap();
    let data = Value::from(json!({"site": "example"}));
    assert_eq!(first.render(&data), "A -- example");
    assert_eq!(second.render(&data), "B -- example");
}

#[test]
fn test_custom_partial_from_closure() {
    let parser = parser_with(&[]);
    parser.add_partial(
        "shout",
        Partial::from_fn(|out, context| {
            if let Some(text) = context.resolve("word").and_then(|v| v.to_text()) {
                out.push_str(&text.to_uppercase());
            }
        }),
    );
    let template = parser.parse("[{{>shout}}]").unwrap();
    assert_eq!(template.render(&Value::from(json!({"word": "hey"}))), "[HEY]");
}

#[test]
fn test_custom_partial_output_is_not_escaped() {
    let parser = parser_with(&[]);
    parser.add_partial("tag", Partial::from_fn(|out, _| out.push_str("<br>")));
    let template = parser.parse("{{>tag}}").unwrap();
    assert_eq!(template.render(&Value::Null), "<br>");
}

#[test]
fn test_custom_partial_rendering_a_template() {
    let inner = Template::parse("<{{v}}>").unwrap();
    let parser = parser_with(&[]);
    parser.add_partial(
        "wrap",
        Partial::from_fn(move |out, context| inner.append_to(out, context)),
    );
    let template = parser.parse("{{#list}}{{>wrap}}{{/list}}").unwrap();
    let data = Value::from(json!({"list": [{"v": 1}, {"v": 2}]}));
    assert_eq!(template.render(&data), "<1><2>");
}

#[test]
fn test_registered_template_partial_uses_its_own_partials() {
    let other = parser_with(&[("inner", "inner:{{x}}")]);
    let registered = other.parse("[{{>inner}}]").unwrap();

    let parser = parser_with(&[]);
    parser.add_partial("outer", Partial::Template(registered));
    let template = parser.parse("{{>outer}}").unwrap();
    assert_eq!(template.render(&Value::from(json!({"x": 5}))), "[inner:5]");
}

#[test]
fn test_add_partial_overwrites_for_later_parses_only() {
    let parser = parser_with(&[("p", "resolved")]);
    let before = parser.parse("{{>p}}").unwrap();
    parser.add_partial("p", Partial::from_fn(|out, _| out.push_str("custom")));
    let after = parser.parse("{{>p}}").unwrap();

    assert_eq!(before.render(&Value::Null), "resolved");
    assert_eq!(after.render(&Value::Null), "custom");
}

/// Stream source that is pending once before producing its items
#[derive(Debug)]
struct Deferred(Vec<&'static str>);

impl StreamSource for Deferred {
    fn open(&self) -> BoxStream<'_, Value> {
        let mut waited = false;
        let mut items = self.0.clone().into_iter();
        stream::poll_fn(move |cx| {
            if !waited {
                waited = true;
                cx.waker().wake_by_ref();
                return Poll::Pending;
            }
            Poll::Ready(items.next().map(Value::from))
        })
        .boxed()
    }
}

/// Custom partial rendering its own template against its own data
struct Embedded {
    template: Template,
    data: Value,
}

impl Render for Embedded {
    fn append_to(&self, out: &mut String, _context: &Context<'_>) {
        self.template.render_to(out, &self.data);
    }

    fn output_to<'a>(
        &'a self,
        sink: &'a mut CharSink<'_>,
        _context: &'a Context<'_>,
    ) -> BoxFuture<'a, Result<(), SinkFailed>> {
        async move {
            let mut sink = sink;
            self.template.output_to(&mut sink, &self.data).await
        }
        .boxed()
    }
}

#[test]
fn test_custom_partial_waiting_on_stream_renders_in_both_modes() {
    let items = Value::stream(Deferred(vec!["a", "b"]));
    let parser = parser_with(&[]);
    parser.add_partial(
        "embedded",
        Partial::custom(Embedded {
            template: Template::parse("{{#items}}{{.}};{{/items}}").unwrap(),
            data: Value::from(crate::Map::from_iter([("items".to_string(), items)])),
        }),
    );
    let template = parser.parse("[{{>embedded}}]").unwrap();

    assert_eq!(template.render(&Value::Null), "[a;b;]");
    assert_eq!(render_streaming(&template, &Value::Null), "[a;b;]");
}

#[test]
fn test_closure_partial_renders_through_streaming_path() {
    let parser = parser_with(&[]);
    parser.add_partial(
        "who",
        Partial::from_fn(|out, context| {
            if let Some(name) = context.resolve("name").and_then(|v| v.to_text()) {
                out.push_str(&name);
            }
        }),
    );
    let template = parser.parse("{{#people}}<{{>who}}>{{/people}}").unwrap();
    let data = Value::from(json!({"people": [{"name": "x"}, {"name": "y"}]}));
    assert_eq!(render_streaming(&template, &data), "<x><y>");
}
