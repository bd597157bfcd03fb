//! All supported localization file formats for langgen.
//!
//! This module re-exports the main types for each format and provides
//! the [`FormatType`] enum for generic format handling across the crate.

pub mod strings;
pub mod xcstrings;

use std::{
    fmt::{Display, Formatter},
    path::Path,
    str::FromStr,
};

// Reexporting the formats for easier access
pub use strings::Format as StringsFormat;
pub use xcstrings::Format as XcstringsFormat;

use crate::Error;

/// Represents all supported localization file formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatType {
    /// Apple `.strings` table, with an optional development region override.
    Strings(Option<String>),
    /// Apple `.xcstrings` catalog (carries its own source language).
    Xcstrings,
}

/// Implements [`std::fmt::Display`] for [`FormatType`].
///
/// # Example
/// ```rust
/// use langgen::formats::FormatType;
/// assert_eq!(FormatType::Strings(None).to_string(), "strings");
/// assert_eq!(FormatType::Xcstrings.to_string(), "xcstrings");
/// ```
impl Display for FormatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatType::Strings(_) => write!(f, "strings"),
            FormatType::Xcstrings => write!(f, "xcstrings"),
        }
    }
}

/// Accepts `"strings"` and `"xcstrings"`, case-insensitively.
///
/// # Example
/// ```rust
/// use langgen::formats::FormatType;
/// use std::str::FromStr;
/// assert_eq!(FormatType::from_str("strings").unwrap(), FormatType::Strings(None));
/// assert_eq!(FormatType::from_str("XCStrings").unwrap(), FormatType::Xcstrings);
/// assert!(FormatType::from_str("xml").is_err());
/// ```
impl FromStr for FormatType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "strings" => Ok(FormatType::Strings(None)),
            "xcstrings" => Ok(FormatType::Xcstrings),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

/// Infers the format from a file extension.
///
/// # Example
/// ```rust
/// use langgen::formats::{FormatType, infer_format_from_extension};
/// assert_eq!(
///     infer_format_from_extension("en.lproj/Localizable.strings"),
///     Some(FormatType::Strings(None))
/// );
/// assert_eq!(infer_format_from_extension("Localizable.json"), None);
/// ```
pub fn infer_format_from_extension<P: AsRef<Path>>(path: P) -> Option<FormatType> {
    let extension = path.as_ref().extension()?.to_str()?;
    FormatType::from_str(extension).ok()
}
