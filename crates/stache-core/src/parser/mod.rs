//! Template parser
//!
//! Turns template text into an element tree. The parser is a recursive
//! descent over [`Scanner`]: every section is parsed by a nested call that
//! returns when the matching close tag is read.
//!
//! The active delimiters and the name of the innermost open section travel
//! down the recursion as a [`ParseContext`] value. A delimiter change replaces
//! the context for the rest of the current level only, so it is undone when
//! the enclosing section closes.

mod resolve;
mod scan;

use crate::error::{Result, TemplateError};
use crate::partial::{Partial, PartialStore, Reservation, Slot};
use crate::template::{Element, PartialRef, Template};
use resolve::Resolver;
use scan::Scanner;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace};

pub use resolve::DEFAULT_EXTENSION;

/// Delimiters and section nesting in effect at one point of the parse
#[derive(Debug, Clone)]
struct ParseContext {
    open: String,
    close: String,
    /// Innermost open section, `None` at top level
    section: Option<String>,
}

impl Default for ParseContext {
    fn default() -> Self {
        Self {
            open: "{{".to_string(),
            close: "}}".to_string(),
            section: None,
        }
    }
}

impl ParseContext {
    fn enter(&self, section: &str) -> Self {
        Self {
            section: Some(section.to_string()),
            ..self.clone()
        }
    }

    fn with_delimiters(&self, open: String, close: String) -> Self {
        Self {
            open,
            close,
            section: self.section.clone(),
        }
    }
}

/// Template parser owning a partial registry
///
/// Every template produced by one parser shares its registry, so a partial
/// referenced from several templates is resolved and parsed only once.
pub struct Parser {
    resolver: Resolver,
    partials: Arc<PartialStore>,
}

impl Parser {
    /// Parser resolving partials as `<name>.mustache` in the current directory
    pub fn new() -> Self {
        Self::with_directory(".")
    }

    /// Parser resolving partials as `<name>.<extension>` in `directory`
    pub fn with_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            resolver: Resolver::directory(directory.into()),
            partials: Arc::default(),
        }
    }

    /// Parser resolving partial sources with a custom function
    pub fn with_resolver<F>(resolve: F) -> Self
    where
        F: Fn(&str) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            resolver: Resolver::Custom(Box::new(resolve)),
            partials: Arc::default(),
        }
    }

    /// File extension used by the directory resolver
    pub fn extension(&self) -> &str {
        self.resolver.extension()
    }

    /// Change the file extension used by the directory resolver
    ///
    /// A single leading `.` is ignored. The extension must start with an
    /// ASCII letter or digit and may continue with letters, digits, `-`, `+`
    /// and `#`.
    pub fn set_extension(&mut self, extension: &str) -> Result<()> {
        self.resolver.set_extension(extension)
    }

    /// Parse template text
    pub fn parse(&self, text: &str) -> Result<Template> {
        trace!(bytes = text.len(), "parsing template");
        let elements = self.parse_elements(text)?;
        Ok(Template::with_partials(elements, Arc::clone(&self.partials)))
    }

    /// Parse template text from a reader (UTF-8)
    pub fn parse_reader(&self, mut reader: impl Read) -> Result<Template> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.parse(&text)
    }

    /// Parse a template file
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Template> {
        let text = std::fs::read_to_string(path.as_ref())?;
        self.parse(&text)
    }

    /// Resolve a name the way partials are resolved and parse the result
    ///
    /// The template is not added to the partial cache.
    pub fn parse_by_name(&self, name: &str) -> Result<Template> {
        let source = self.resolver.resolve(name)?;
        self.parse(&source)
    }

    /// Register a partial under `name`, replacing any earlier one
    ///
    /// Templates parsed before the call keep the partial they were bound to.
    pub fn add_partial(&self, name: &str, partial: Partial) {
        debug!(partial = name, "registering partial");
        self.partials.register(name, partial);
    }

    /// Whether `name` is currently cached or registered
    pub fn has_partial(&self, name: &str) -> bool {
        self.partials.index_of(name).is_some()
    }

    fn parse_elements(&self, text: &str) -> Result<Vec<Element>> {
        let mut scanner = Scanner::new(text);
        self.parse_nested(&mut scanner, ParseContext::default())
    }

    fn parse_nested(&self, scanner: &mut Scanner<'_>, context: ParseContext) -> Result<Vec<Element>> {
        let mut context = context;
        let mut elements = Vec::new();
        let mut buf = String::new();

        while scanner.read_until(&context.open, &mut buf) {
            if !buf.is_empty() {
                elements.push(Element::Text(std::mem::take(&mut buf)));
            }
            match scanner.next_char() {
                None => {
                    return Err(TemplateError::parse(
                        "Unclosed tag at end of document",
                        scanner.line(),
                    ))
                }
                Some('{') => {
                    let close = format!("}}{}", context.close);
                    if !scanner.read_until(&close, &mut buf) {
                        return Err(TemplateError::parse(
                            "Unclosed literal tag at end of document",
                            scanner.line(),
                        ));
                    }
                    let tag = take_trimmed(&mut buf);
                    if tag.is_empty() {
                        return Err(TemplateError::parse(
                            "Illegal empty literal tag",
                            scanner.line(),
                        ));
                    }
                    elements.push(Element::LiteralVariable(tag));
                }
                Some(ch) => {
                    buf.push(ch);
                    if !scanner.read_until(&context.close, &mut buf) {
                        return Err(TemplateError::parse(
                            "Unclosed tag at end of document",
                            scanner.line(),
                        ));
                    }
                    let tag = take_trimmed(&mut buf);
                    let line = scanner.line();
                    let mut sigils = tag.chars();
                    match sigils.next() {
                        None => return Err(TemplateError::parse("Illegal empty tag", line)),
                        Some('&') => {
                            let name = tag_name(sigils.as_str(), line)?;
                            elements.push(Element::LiteralVariable(name.to_string()));
                        }
                        Some('#') => {
                            let name = tag_name(sigils.as_str(), line)?;
                            let children = self.parse_nested(scanner, context.enter(name))?;
                            elements.push(Element::Section {
                                path: name.to_string(),
                                children,
                            });
                        }
                        Some('^') => {
                            let name = tag_name(sigils.as_str(), line)?;
                            let children = self.parse_nested(scanner, context.enter(name))?;
                            elements.push(Element::InvertedSection {
                                path: name.to_string(),
                                children,
                            });
                        }
                        Some('/') => {
                            let name = sigils.as_str().trim();
                            if context.section.as_deref() != Some(name) {
                                return Err(TemplateError::parse(
                                    format!("Unmatched section close tag - {}", name),
                                    line,
                                ));
                            }
                            return Ok(elements);
                        }
                        Some('>') => {
                            let name = tag_name(sigils.as_str(), line)?;
                            let slot = self.partial(name)?;
                            elements.push(Element::Partial(PartialRef::new(name, slot)));
                        }
                        Some('=') => {
                            let (open, close) = parse_delimiters(&tag, line)?;
                            context = context.with_delimiters(open, close);
                        }
                        Some('!') => {}
                        Some(_) => elements.push(Element::Variable(tag)),
                    }
                }
            }
        }

        if context.section.is_some() {
            return Err(TemplateError::parse(
                "Unclosed section at end of document",
                scanner.line(),
            ));
        }
        if !buf.is_empty() {
            elements.push(Element::Text(buf));
        }
        Ok(elements)
    }

    /// Bind a partial name to its registry slot, resolving it on first use
    fn partial(&self, name: &str) -> Result<usize> {
        let (index, slot) = match self.partials.reserve(name) {
            Reservation::Cached(index) => return Ok(index),
            Reservation::Fresh(index, slot) => (index, slot),
        };

        debug!(partial = name, "resolving partial");
        let parsed = self
            .resolver
            .resolve(name)
            .and_then(|source| self.parse_elements(&source));
        match parsed {
            Ok(elements) => {
                let filled = slot.set(Slot::Parsed(elements));
                debug_assert!(filled.is_ok(), "fresh slot for {} was already filled", name);
                Ok(index)
            }
            Err(e) => {
                self.partials.release(name, index);
                Err(e)
            }
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

fn take_trimmed(buf: &mut String) -> String {
    let tag = buf.trim().to_string();
    buf.clear();
    tag
}

/// Name following a sigil, which must not be empty
fn tag_name(rest: &str, line: usize) -> Result<&str> {
    let name = rest.trim();
    if name.is_empty() {
        return Err(TemplateError::parse("Illegal empty tag", line));
    }
    Ok(name)
}

/// Parse `=OPEN CLOSE=` into the new delimiter pair
///
/// The body between the `=` signs must be two tokens separated by spaces,
/// with nothing before the first token or after the second. Neither token
/// may contain `=` or whitespace.
fn parse_delimiters(tag: &str, line: usize) -> Result<(String, String)> {
    let incorrect = || TemplateError::parse("Incorrect delimiter tag", line);
    let inner = tag
        .strip_prefix('=')
        .and_then(|rest| rest.strip_suffix('='))
        .filter(|inner| !inner.contains('='))
        .ok_or_else(incorrect)?;
    let (open, rest) = inner.split_once(' ').ok_or_else(incorrect)?;
    let close = rest.trim_start_matches(' ');
    let is_token = |token: &str| !token.is_empty() && !token.contains(char::is_whitespace);
    if !is_token(open) || !is_token(close) {
        return Err(incorrect());
    }
    Ok((open.to_string(), close.to_string()))
}

#[cfg(test)]
mod tests;
