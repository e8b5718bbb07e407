//! Tests for template rendering
//!
//! Split by concern the same way the parser tests are. Every synchronous
//! expectation here also holds for the streaming renderer; `streaming.rs`
//! checks that explicitly for the interesting cases.

use super::*;

// Test helper functions
mod helpers;

mod render_partials;
