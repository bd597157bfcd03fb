//! Core, format-agnostic types for langgen.
//! Parsers decode into these; identifier synthesis and the emitter consume them.

use std::fmt::Display;

/// Semantic kind of a single format argument.
///
/// Each variant binds to one host-language type, see [`ArgumentKind::host_type`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArgumentKind {
    String,
    SignedInteger,
    UnsignedInteger,
    FloatingPoint,
    Character,
    /// Carries the raw specifier text for diagnostics.
    Unknown(String),
}

impl ArgumentKind {
    /// The Swift type an argument of this kind is bound to.
    pub fn host_type(&self) -> &'static str {
        match self {
            ArgumentKind::String => "String",
            ArgumentKind::SignedInteger => "Int",
            ArgumentKind::UnsignedInteger => "UInt",
            ArgumentKind::FloatingPoint => "Double",
            ArgumentKind::Character => "Character",
            ArgumentKind::Unknown(_) => "CustomStringConvertible",
        }
    }
}

impl Display for ArgumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgumentKind::String => write!(f, "string"),
            ArgumentKind::SignedInteger => write!(f, "signed-integer"),
            ArgumentKind::UnsignedInteger => write!(f, "unsigned-integer"),
            ArgumentKind::FloatingPoint => write!(f, "floating-point"),
            ArgumentKind::Character => write!(f, "character"),
            ArgumentKind::Unknown(raw) => write!(f, "unknown({})", raw),
        }
    }
}

/// One argument of a format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatArgument {
    /// 1-based position of the argument.
    pub position: usize,
    pub kind: ArgumentKind,
    /// Only set when the source named the placeholder explicitly (catalog substitutions).
    pub label: Option<String>,
}

impl FormatArgument {
    /// Builds an unlabeled argument from a length modifier + conversion letter.
    pub fn from_specifier(position: usize, specifier: &str) -> Self {
        FormatArgument {
            position,
            kind: crate::placeholder::classify(specifier),
            label: None,
        }
    }
}

/// A single localized string, the unit handed to identifier synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedEntry {
    /// Key as written in the source table or catalog.
    pub key: String,
    /// Table the entry belongs to; entries of one table share a namespace.
    pub table: String,
    /// Text in the development language.
    pub default_text: String,
    /// Optional comment for translators.
    pub comment: Option<String>,
    /// Arguments sorted by position.
    pub arguments: Vec<FormatArgument>,
    /// Human readable origin used in diagnostics.
    pub source_location: String,
}

impl LocalizedEntry {
    /// Whether the entry needs a callable accessor rather than a plain property.
    pub fn requires_callable(&self) -> bool {
        !self.arguments.is_empty()
    }
}

impl Display for LocalizedEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LocalizedEntry {{ table: {}, key: {}, arguments: {} }}",
            self.table,
            self.key,
            self.arguments.len()
        )
    }
}

/// A [`LocalizedEntry`] together with the identifiers the emitter should use for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedEntry {
    pub entry: LocalizedEntry,
    /// Property or function name.
    pub identifier: String,
    /// One parameter label per argument, in position order.
    pub labels: Vec<String>,
}
