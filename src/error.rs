//! All error types for the langgen crate.
//!
//! File-level failures carry the path of the offending file so the caller can
//! decide whether to abort the whole run or skip that one file.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown format `{0}`")]
    UnknownFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed catalog `{path}`: {source}")]
    MalformedCatalog {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("catalog `{path}` is missing required field `{field}`")]
    MissingField { path: String, field: &'static str },

    #[error("`{path}` is neither UTF-8 nor UTF-16 encoded")]
    UnreadableEncoding { path: String },

    #[error(
        "no development region for `{path}`, place it in a `.lproj` folder or provide a development region"
    )]
    MissingDevelopmentRegion { path: String },

    #[error("unsafe table name for `{path}`: {source}")]
    UnsafeTableName {
        path: String,
        #[source]
        source: Box<Error>,
    },

    #[error("unsafe character {character:?} in `{text}`")]
    UnsafeString { text: String, character: char },

    #[error("duplicate {category} identifier `{identifier}` generated from: {}", .locations.join(", "))]
    DuplicateIdentifier {
        category: String,
        identifier: String,
        locations: Vec<String>,
    },
}

impl Error {
    /// Creates a new unsafe-string error, truncating the reported text to 50 characters.
    pub fn unsafe_string(text: &str, character: char) -> Self {
        Error::UnsafeString {
            text: text.chars().take(50).collect(),
            character,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_unknown_format_error() {
        let error = Error::UnknownFormat("xml".to_string());
        assert_eq!(error.to_string(), "unknown format `xml`");
    }

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = Error::Io(io_error);
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_malformed_catalog_error_names_path() {
        let source = serde_json::from_str::<serde_json::Value>("{ invalid json }").unwrap_err();
        let error = Error::MalformedCatalog {
            path: "Localizable.xcstrings".to_string(),
            source,
        };
        assert!(error.to_string().contains("Localizable.xcstrings"));
    }

    #[test]
    fn test_unsafe_string_truncates_text() {
        let long = "a".repeat(80) + "\"";
        let error = Error::unsafe_string(&long, '"');
        match error {
            Error::UnsafeString { text, character } => {
                assert_eq!(text.chars().count(), 50);
                assert_eq!(character, '"');
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_unsafe_table_name_names_path_and_character() {
        let error = Error::UnsafeTableName {
            path: "en.lproj/Bad\"Name.strings".to_string(),
            source: Box::new(Error::unsafe_string("Bad\"Name", '"')),
        };
        let display = error.to_string();
        assert!(display.contains("en.lproj/Bad\"Name.strings"));
        assert!(display.contains("'\"'"));
    }

    #[test]
    fn test_duplicate_identifier_lists_all_locations() {
        let error = Error::DuplicateIdentifier {
            category: "string".to_string(),
            identifier: "iconHome".to_string(),
            locations: vec!["a.strings:1".to_string(), "a.strings:2".to_string()],
        };
        let display = error.to_string();
        assert!(display.contains("iconHome"));
        assert!(display.contains("a.strings:1, a.strings:2"));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::MissingDevelopmentRegion {
            path: "Localizable.strings".to_string(),
        };
        let debug = format!("{:?}", error);
        assert!(debug.contains("MissingDevelopmentRegion"));
    }
}
