//! Partial source resolution

use crate::error::{Result, TemplateError};
use std::path::PathBuf;

/// Extension used by the directory resolver unless configured otherwise
pub const DEFAULT_EXTENSION: &str = "mustache";

type ResolveFn = Box<dyn Fn(&str) -> Result<String> + Send + Sync>;

/// Where partial sources come from
pub(crate) enum Resolver {
    /// `<directory>/<name>.<extension>`
    Directory { root: PathBuf, extension: String },
    Custom(ResolveFn),
}

impl Resolver {
    pub(crate) fn directory(root: PathBuf) -> Self {
        Resolver::Directory {
            root,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub(crate) fn extension(&self) -> &str {
        match self {
            Resolver::Directory { extension, .. } => extension,
            Resolver::Custom(_) => DEFAULT_EXTENSION,
        }
    }

    pub(crate) fn set_extension(&mut self, value: &str) -> Result<()> {
        let value = validate_extension(value)?;
        if let Resolver::Directory { extension, .. } = self {
            *extension = value.to_string();
        }
        Ok(())
    }

    pub(crate) fn resolve(&self, name: &str) -> Result<String> {
        match self {
            Resolver::Directory { root, extension } => {
                let path = root.join(format!("{}.{}", name, extension));
                std::fs::read_to_string(&path).map_err(|e| TemplateError::PartialNotFound {
                    name: name.to_string(),
                    reason: format!("{}: {}", path.display(), e),
                })
            }
            Resolver::Custom(resolve) => resolve(name),
        }
    }
}

/// Check an extension, returning it without its optional leading `.`
fn validate_extension(value: &str) -> Result<&str> {
    let trimmed = value.strip_prefix('.').unwrap_or(value);
    let mut chars = trimmed.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphanumeric())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '#'));
    if !valid {
        return Err(TemplateError::InvalidExtension(value.to_string()));
    }
    Ok(trimmed)
}
