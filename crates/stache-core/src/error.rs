use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    /// Malformed template text; nothing of the template is usable
    #[error("TEMPLATE_PARSE_ERROR: {message} (line {line})")]
    Parse { message: String, line: usize },

    #[error("TEMPLATE_INVALID_EXTENSION: invalid extension - {0}")]
    InvalidExtension(String),

    #[error("PARTIAL_NOT_FOUND: partial '{name}' could not be resolved: {reason}")]
    PartialNotFound { name: String, reason: String },

    #[error("DATA_CONVERSION_ERROR: {0}")]
    Data(String),

    #[error("IO_ERROR: {0}")]
    Io(#[from] std::io::Error),
}

impl TemplateError {
    pub(crate) fn parse(message: impl Into<String>, line: usize) -> Self {
        TemplateError::Parse {
            message: message.into(),
            line,
        }
    }
}

pub type Result<T> = std::result::Result<T, TemplateError>;
