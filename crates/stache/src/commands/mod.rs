//! CLI command implementations

pub mod check;
pub mod render;

use crate::cli::PartialArgs;
use crate::config::Config;
use anyhow::{Context as _, Result};
use stache_core::Parser;
use std::path::Path;

/// Build a parser for `template`, flags taking precedence over the config file
///
/// Partials default to the template's own directory.
pub(crate) fn parser_for(template: &Path, lookup: &PartialArgs, config: &Config) -> Result<Parser> {
    let directory = lookup
        .partials
        .clone()
        .or_else(|| config.partials.directory.clone())
        .unwrap_or_else(|| match template.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => Path::new(".").to_path_buf(),
        });

    let mut parser = Parser::with_directory(&directory);
    if let Some(extension) = lookup.extension.as_ref().or(config.partials.extension.as_ref()) {
        parser
            .set_extension(extension)
            .with_context(|| format!("Invalid partial extension '{}'", extension))?;
    }
    tracing::debug!(
        directory = %directory.display(),
        extension = parser.extension(),
        "partial lookup configured"
    );
    Ok(parser)
}
