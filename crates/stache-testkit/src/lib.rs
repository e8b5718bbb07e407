//! Test utilities for stache
//!
//! This crate provides shared testing utilities used across the stache workspace.

pub mod fixtures;

pub use fixtures::{write_file, write_templates};

use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` at the project root
///
/// This ensures all test temporary files are centralized in a single location
/// that is gitignored and easy to clean up manually if needed.
///
/// # Returns
///
/// A `TempDir` instance that automatically cleans up on drop.
/// The directory is created at `.tmp/<random-name>` relative to the current
/// directory.
///
/// # Panics
///
/// Panics if:
/// - Unable to determine current directory
/// - Unable to create `.tmp/` directory
/// - Unable to create temporary subdirectory
///
/// # Examples
///
/// ```rust
/// use stache_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let file_path = temp.path().join("page.mustache");
/// std::fs::write(&file_path, "Hello {{name}}").unwrap();
/// // Cleanup happens automatically when temp is dropped
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
///
/// Use this variant when you need proper error handling instead of panics.
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let workspace_root = std::env::current_dir()?;
    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}
