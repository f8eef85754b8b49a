//! Test utilities for rendersub
//!
//! This crate provides shared testing utilities used across the rendersub workspace.

mod env;
pub mod fixtures;

pub use env::{ENV_LOCK, with_isolated_env};
pub use fixtures::FixtureProject;

use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` at the project root
///
/// All test temporary files land in one gitignored location.
///
/// # Panics
///
/// Panics if the current directory is unknown or `.tmp/` cannot be created.
///
/// # Examples
///
/// ```rust
/// use rendersub_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let file_path = temp.path().join("test.txt");
/// std::fs::write(&file_path, "test data").unwrap();
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let workspace_root = std::env::current_dir()?;
    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}
