//! Element trees produced for well-formed templates

use super::*;

fn parse(text: &str) -> Vec<Element> {
    Parser::new().parse(text).unwrap().elements().to_vec()
}

fn text(s: &str) -> Element {
    Element::Text(s.to_string())
}

fn variable(path: &str) -> Element {
    Element::Variable(path.to_string())
}

#[test]
fn test_parse_empty_template() {
    assert!(parse("").is_empty());
}

#[test]
fn test_parse_text_only() {
    assert_eq!(parse("hello"), vec![text("hello")]);
}

#[test]
fn test_parse_variable() {
    assert_eq!(parse("hello, {{aaa}}"), vec![text("hello, "), variable("aaa")]);
}

#[test]
fn test_parse_trims_tag_names() {
    assert_eq!(parse("{{  aaa  }}"), vec![variable("aaa")]);
    assert_eq!(
        parse("{{# items }}{{/ items }}"),
        vec![Element::Section {
            path: "items".to_string(),
            children: vec![],
        }]
    );
}

#[test]
fn test_parse_literal_variables() {
    let expected = vec![
        text("a="),
        Element::LiteralVariable("a".to_string()),
        text(", b="),
        Element::LiteralVariable("b".to_string()),
    ];
    assert_eq!(parse("a={{{a}}}, b={{& b}}"), expected);
}

#[test]
fn test_parse_section_with_children() {
    let expected = vec![
        text("data:"),
        Element::Section {
            path: "items".to_string(),
            children: vec![text(" hello, "), variable("aaa"), text(";")],
        },
    ];
    assert_eq!(parse("data:{{#items}} hello, {{aaa}};{{/items}}"), expected);
}

#[test]
fn test_parse_inverted_section() {
    let expected = vec![Element::InvertedSection {
        path: "c".to_string(),
        children: vec![text("false")],
    }];
    assert_eq!(parse("{{^c}}false{{/c}}"), expected);
}

#[test]
fn test_parse_nested_sections() {
    let expected = vec![Element::Section {
        path: "a".to_string(),
        children: vec![Element::Section {
            path: "b".to_string(),
            children: vec![variable("c")],
        }],
    }];
    assert_eq!(parse("{{#a}}{{#b}}{{c}}{{/b}}{{/a}}"), expected);
}

#[test]
fn test_parse_same_name_nested_sections() {
    let elements = parse("{{#a}}{{#a}}x{{/a}}{{/a}}");
    let Element::Section { children, .. } = &elements[0] else {
        panic!("Expected section, got {:?}", elements[0]);
    };
    assert!(matches!(&children[0], Element::Section { path, .. } if path == "a"));
}

#[test]
fn test_parse_comment_is_dropped() {
    assert_eq!(parse("a{{! a comment }}b"), vec![text("a"), text("b")]);
}

#[test]
fn test_parse_dotted_paths_kept_whole() {
    assert_eq!(parse("{{q.xxx.aaa}}"), vec![variable("q.xxx.aaa")]);
    assert_eq!(parse("{{.}}"), vec![variable(".")]);
}

#[test]
fn test_parse_reader() {
    let template = Parser::new()
        .parse_reader("hello, {{aaa}}".as_bytes())
        .unwrap();
    assert_eq!(template.elements(), &[text("hello, "), variable("aaa")]);
}

#[test]
fn test_parse_preserves_unicode_text() {
    assert_eq!(parse("€ {{x}} ü"), vec![text("€ "), variable("x"), text(" ü")]);
}
