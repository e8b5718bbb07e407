//! Template fixtures written to disk

use std::path::{Path, PathBuf};

/// Write `contents` to `dir/name`, creating parent directories
///
/// # Panics
///
/// Panics if the file or its parent directories cannot be created.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    std::fs::write(&path, contents).expect("Failed to write fixture file");
    path
}

/// Write a set of templates as `dir/<name>.mustache`
///
/// Returns the written paths in the order given.
///
/// # Examples
///
/// ```rust
/// use stache_testkit::{temp_dir_in_workspace, write_templates};
///
/// let temp = temp_dir_in_workspace();
/// let paths = write_templates(temp.path(), &[("header", "<h1>{{title}}</h1>")]);
/// assert!(paths[0].ends_with("header.mustache"));
/// ```
pub fn write_templates(dir: &Path, templates: &[(&str, &str)]) -> Vec<PathBuf> {
    templates
        .iter()
        .map(|(name, contents)| write_file(dir, &format!("{}.mustache", name), contents))
        .collect()
}
