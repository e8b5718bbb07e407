// Core modules
pub mod context;
pub mod error;
pub mod parser;
pub mod partial;
pub mod render;
pub mod template;
pub mod value;

// Re-export commonly used types
pub use context::Context;
pub use error::{Result, TemplateError};
pub use parser::Parser;
pub use partial::{CharSink, Partial, Render, SinkFailed};
pub use render::{StringSink, WriteSink};
pub use template::{Element, PartialRef, Template};
pub use value::{Enumeration, Fields, Map, StreamSource, Value};
