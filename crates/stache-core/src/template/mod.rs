//! Compiled templates
//!
//! A [`Template`] is the root of an element tree plus a handle on the partial
//! registry its `{{>name}}` references were bound against. Both are read-only
//! once parsing has finished, so one template can be rendered any number of
//! times, from any number of threads.
//!
//! ## Syntax
//!
//! - Variables: `{{name}}` (HTML-escaped), `{{{name}}}` or `{{&name}}` (raw)
//! - Nested access: `{{person.name}}`, current value: `{{.}}`
//! - Sections: `{{#items}} ... {{/items}}`, inverted: `{{^items}} ... {{/items}}`
//! - Partials: `{{>name}}`
//! - Comments: `{{! ignored }}`
//! - Delimiter change: `{{=<% %>=}}`

mod element;

pub use element::{Element, PartialRef};

use crate::error::Result;
use crate::parser::Parser;
use crate::partial::PartialStore;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

#[derive(Clone)]
pub struct Template {
    pub(crate) elements: Vec<Element>,
    pub(crate) partials: Arc<PartialStore>,
}

impl Template {
    /// Build a template directly from elements
    pub fn new(elements: Vec<Element>) -> Self {
        Self::with_partials(elements, Arc::default())
    }

    pub(crate) fn with_partials(elements: Vec<Element>, partials: Arc<PartialStore>) -> Self {
        Self { elements, partials }
    }

    /// Parse template text, resolving partials from the current directory
    pub fn parse(text: &str) -> Result<Self> {
        Parser::new().parse(text)
    }

    /// Parse a template file, resolving partials next to it
    pub fn parse_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let directory = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        Parser::with_directory(directory).parse_file(path)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("elements", &self.elements)
            .finish_non_exhaustive()
    }
}
