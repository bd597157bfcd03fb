//! Traits for format-agnostic parsing in langgen.

use std::path::Path;

use crate::{error::Error, types::LocalizedEntry};

/// A trait for parsing one localization file.
///
/// # Example
///
/// ```rust,no_run
/// use langgen::traits::{Extract, Parser};
/// let catalog = langgen::formats::xcstrings::Format::read_from("Localizable.xcstrings")?;
/// let entries = catalog.extract("Localizable", "Localizable.xcstrings");
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from raw file bytes. `path` is only used to label errors.
    fn from_bytes(bytes: &[u8], path: &str) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes, &path.display().to_string())
    }

    /// Parse from a string.
    fn from_str(s: &str, path: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_bytes(s.as_bytes(), path)
    }
}

/// A parsed file that can produce [`LocalizedEntry`] values for one table.
pub trait Extract {
    /// Returns the validated entries sorted by key. Unsafe entries are dropped.
    fn extract(&self, table: &str, path: &str) -> Vec<LocalizedEntry>;
}
