//! Tests for the template parser
//!
//! Organized by concern: raw delimiter scanning, the element tree produced
//! for well-formed input, delimiter changes, partial binding and errors.

use super::*;

// Scanner tests
mod scanner;

// Element tree tests
mod structure;
