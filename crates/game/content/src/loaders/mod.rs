//! Content loaders for reading battle data from disk.
//!
//! Loaders read the record formats of [`crate::records`] and the TOML game
//! configuration, wrapping every failure with the offending file.

pub mod config;
pub mod content;

pub use config::ConfigLoader;
pub use content::ContentLoader;

use std::path::Path;

use anyhow::Context as _;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}

/// Helper function to write file contents, creating parent directories.
pub(crate) fn write_file(path: &Path, contents: &str) -> LoadResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("Failed to write file {}", path.display()))
}
