//! Unit tests for the delimiter scanner

use crate::parser::scan::Scanner;

#[test]
fn test_read_until_finds_delimiter() {
    let mut scanner = Scanner::new("hello {{name}}");
    let mut buf = String::new();
    assert!(scanner.read_until("{{", &mut buf));
    assert_eq!(buf, "hello ");

    buf.clear();
    assert!(scanner.read_until("}}", &mut buf));
    assert_eq!(buf, "name");
}

#[test]
fn test_read_until_end_of_input_returns_false() {
    let mut scanner = Scanner::new("no tags here");
    let mut buf = String::new();
    assert!(!scanner.read_until("{{", &mut buf));
    assert_eq!(buf, "no tags here");
    assert_eq!(scanner.next_char(), None);
}

#[test]
fn test_read_until_partial_delimiter_at_end_is_kept() {
    let mut scanner = Scanner::new("text {");
    let mut buf = String::new();
    assert!(!scanner.read_until("{{", &mut buf));
    assert_eq!(buf, "text {");
}

#[test]
fn test_read_until_matches_against_buffered_tail() {
    // The first '<' is buffered before it turns out to start the delimiter
    let mut scanner = Scanner::new("a<<%b");
    let mut buf = String::new();
    assert!(scanner.read_until("<%", &mut buf));
    assert_eq!(buf, "a<");
    assert_eq!(scanner.next_char(), Some('b'));
}

#[test]
fn test_read_until_single_char_delimiter() {
    let mut scanner = Scanner::new("abc|def");
    let mut buf = String::new();
    assert!(scanner.read_until("|", &mut buf));
    assert_eq!(buf, "abc");
}

#[test]
fn test_read_until_multibyte_delimiter() {
    let mut scanner = Scanner::new("x«y»z");
    let mut buf = String::new();
    assert!(scanner.read_until("«", &mut buf));
    assert_eq!(buf, "x");
    buf.clear();
    assert!(scanner.read_until("»", &mut buf));
    assert_eq!(buf, "y");
}

#[test]
fn test_scanner_counts_lines() {
    let mut scanner = Scanner::new("one\ntwo\nthree");
    assert_eq!(scanner.line(), 1);
    let mut buf = String::new();
    assert!(scanner.read_until("two", &mut buf));
    assert_eq!(scanner.line(), 2);
    assert!(!scanner.read_until("{{", &mut buf));
    assert_eq!(scanner.line(), 3);
}
