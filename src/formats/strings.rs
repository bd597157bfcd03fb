//! Support for Apple `.strings` localization tables.
//!
//! Tables are line oriented: `"key" = "value";` statements, optionally preceded
//! by a single-line `/* ... */` or `// ...` comment that documents the next
//! statement.

use std::{borrow::Cow, path::Path};

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE};
use log::{debug, warn};
use unic_langid::LanguageIdentifier;

use crate::{
    error::Error,
    placeholder::parse as parse_arguments,
    traits::{Extract, Parser},
    types::LocalizedEntry,
    validation::{CharacterSet, validate},
};

/// Suffix of the per-language folders tables live in (`en.lproj`).
pub const REGION_FOLDER_SUFFIX: &str = ".lproj";

/// Xcode's base localization. It stands in for the development region unless
/// that region's own folder provides the same table.
const BASE_REGION: &str = "Base";

/// Represents an Apple `.strings` file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Format {
    /// All key-value pairs in file order.
    pub pairs: Vec<Pair>,
}

/// A single key-value pair in a `.strings` file, possibly with an associated comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    /// The unescaped key.
    pub key: String,
    /// The unescaped value.
    pub value: String,
    /// Comment before the statement, without its markers: either a block comment
    /// opening the statement line or the last comment line above it.
    ///
    /// Trailing comments after the semicolon are not attached.
    pub comment: Option<String>,
    /// 1-based line number of the statement.
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Blank,
    Comment(String),
    Statement {
        key: String,
        value: String,
        comment: Option<String>,
    },
    Malformed,
}

impl Parser for Format {
    fn from_bytes(bytes: &[u8], path: &str) -> Result<Self, Error> {
        let content = decode(bytes, path)?;
        Ok(Format::from_text(&content, path))
    }
}

impl Format {
    /// Parses already decoded text. Malformed lines are skipped.
    pub fn from_text(content: &str, path: &str) -> Self {
        let mut pairs = Vec::new();
        let mut pending_comment = None;

        for (index, line) in content.lines().enumerate() {
            match classify_line(line) {
                Line::Blank => {}
                Line::Comment(comment) => pending_comment = Some(comment),
                Line::Statement {
                    key,
                    value,
                    comment,
                } => pairs.push(Pair {
                    key,
                    value,
                    comment: comment.or(pending_comment.take()),
                    line: index + 1,
                }),
                Line::Malformed => debug!("{}:{}: ignoring malformed line", path, index + 1),
            }
        }

        Format { pairs }
    }
}

impl Extract for Format {
    fn extract(&self, table: &str, path: &str) -> Vec<LocalizedEntry> {
        let mut entries = self
            .pairs
            .iter()
            .filter_map(|pair| {
                let checked = validate(&pair.key, CharacterSet::LocalizedText)
                    .and_then(|_| validate(&pair.value, CharacterSet::LocalizedText));
                if let Err(err) = checked {
                    warn!("dropping `{}` from {}:{}: {}", pair.key, path, pair.line, err);
                    return None;
                }

                Some(LocalizedEntry {
                    key: pair.key.clone(),
                    table: table.to_string(),
                    default_text: pair.value.clone(),
                    comment: pair.comment.clone(),
                    arguments: parse_arguments(&pair.value),
                    source_location: format!("{}:{}", path, pair.line),
                })
            })
            .collect::<Vec<_>>();

        entries.sort_by(|a, b| a.key.cmp(&b.key));
        entries
    }
}

/// Parses one table file into entries of the development region.
///
/// The region comes from `development_region` or, failing that, from the
/// `<region>.lproj` folder the file sits in. A table inside another region's
/// folder is a translation and yields no entries.
pub fn parse(
    content: &str,
    development_region: Option<&str>,
    path: &str,
) -> Result<Vec<LocalizedEntry>, Error> {
    let inferred = infer_region(path);
    let region = development_region
        .map(str::to_string)
        .or_else(|| inferred.clone())
        .ok_or_else(|| Error::MissingDevelopmentRegion {
            path: path.to_string(),
        })?;

    if let Some(inferred) = &inferred {
        if inferred != BASE_REGION && !same_region(inferred, &region) {
            debug!("skipping {}: region {} is not {}", path, inferred, region);
            return Ok(Vec::new());
        }
    }

    Ok(Format::from_text(content, path).extract(&table_name(path), path))
}

/// Region named by the file's parent folder (`en.lproj/Localizable.strings` -> `en`).
pub fn infer_region<P: AsRef<Path>>(path: P) -> Option<String> {
    let folder = path.as_ref().parent()?.file_name()?.to_str()?;
    folder
        .strip_suffix(REGION_FOLDER_SUFFIX)
        .filter(|region| !region.is_empty())
        .map(str::to_string)
}

/// Whether the file sits in `Base.lproj`.
pub fn in_base_folder<P: AsRef<Path>>(path: P) -> bool {
    infer_region(path).as_deref() == Some(BASE_REGION)
}

/// Whether the file sits in the development region's own `.lproj` folder.
///
/// Without an explicit region, any non-`Base` folder names the development region.
pub fn in_development_folder<P: AsRef<Path>>(path: P, development_region: Option<&str>) -> bool {
    match infer_region(path) {
        Some(inferred) if inferred != BASE_REGION => {
            development_region.is_none_or(|region| same_region(&inferred, region))
        }
        _ => false,
    }
}

/// Table name derived from the file name (`Localizable.strings` -> `Localizable`).
pub fn table_name<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .to_string()
}

/// Compares two region codes, accepting `_` and `-` as subtag separators.
fn same_region(a: &str, b: &str) -> bool {
    let a = a.replace('_', "-");
    let b = b.replace('_', "-");
    match (a.parse::<LanguageIdentifier>(), b.parse::<LanguageIdentifier>()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a.eq_ignore_ascii_case(&b),
    }
}

/// Decodes table bytes: BOM first, then UTF-8, then UTF-16 without a BOM.
///
/// BOM-less UTF-16 is only considered when the bytes contain NUL.
pub fn decode(bytes: &[u8], path: &str) -> Result<String, Error> {
    let unreadable = || Error::UnreadableEncoding {
        path: path.to_string(),
    };

    if let Some((encoding, bom_length)) = Encoding::for_bom(bytes) {
        return encoding
            .decode_without_bom_handling_and_without_replacement(&bytes[bom_length..])
            .map(Cow::into_owned)
            .ok_or_else(unreadable);
    }

    // NUL never appears in a text table but is every other byte of BOM-less UTF-16.
    if !bytes.contains(&0) {
        return std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|_| unreadable());
    }

    let candidates = if bytes.first() == Some(&0) {
        [UTF_16BE, UTF_16LE]
    } else {
        [UTF_16LE, UTF_16BE]
    };
    candidates
        .into_iter()
        .find_map(|encoding| encoding.decode_without_bom_handling_and_without_replacement(bytes))
        .map(Cow::into_owned)
        .ok_or_else(unreadable)
}

fn classify_line(line: &str) -> Line {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        Line::Blank
    } else if let Some(comment) = trimmed.strip_prefix("/*") {
        match comment.split_once("*/") {
            // `/* note */ "key" = "value";` documents its own statement.
            Some((comment, rest)) if !rest.trim().is_empty() => parse_statement(rest.trim())
                .map(|(key, value)| Line::Statement {
                    key,
                    value,
                    comment: Some(comment.trim().to_string()),
                })
                .unwrap_or(Line::Malformed),
            Some((comment, _)) => Line::Comment(comment.trim().to_string()),
            None => Line::Comment(comment.trim().to_string()),
        }
    } else if let Some(comment) = trimmed.strip_prefix("//") {
        Line::Comment(comment.trim().to_string())
    } else {
        parse_statement(trimmed)
            .map(|(key, value)| Line::Statement {
                key,
                value,
                comment: None,
            })
            .unwrap_or(Line::Malformed)
    }
}

/// Parses `"key" = "value";`, allowing a trailing comment after the semicolon.
fn parse_statement(line: &str) -> Option<(String, String)> {
    let rest = line.strip_prefix('"')?;
    let (key, rest) = read_quoted(rest)?;
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let (value, rest) = read_quoted(rest.strip_prefix('"')?)?;
    let rest = rest.trim_start().strip_prefix(';')?.trim_start();

    if rest.is_empty() || rest.starts_with("//") || rest.starts_with("/*") {
        Some((key, value))
    } else {
        None
    }
}

/// Reads up to the closing quote, unescaping as it goes. Returns the text after the quote.
fn read_quoted(s: &str) -> Option<(String, &str)> {
    let mut out = String::new();
    let mut chars = s.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Some((out, &s[i + 1..])),
            '\\' => match chars.next()?.1 {
                '"' => out.push('"'),
                '\\' => out.push('\\'),
                'n' => out.push('\n'),
                't' => out.push('\t'),
                'r' => out.push('\r'),
                other => {
                    out.push('\\');
                    out.push(other);
                }
            },
            c => out.push(c),
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ArgumentKind;

    #[test]
    fn test_parse_basic_strings_with_comment() {
        let content = r#"
        /* Greeting for the user */
        "hello" = "Hello, world!";
        "#;
        let parsed = Format::from_str(content, "Localizable.strings").unwrap();
        assert_eq!(parsed.pairs.len(), 1);
        let pair = &parsed.pairs[0];
        assert_eq!(pair.key, "hello");
        assert_eq!(pair.value, "Hello, world!");
        assert_eq!(pair.comment.as_deref(), Some("Greeting for the user"));
        assert_eq!(pair.line, 3);
    }

    #[test]
    fn test_comments_attached_to_correct_key_value_pairs() {
        let content = r#"
        // Comment for A
        "A" = "a";
        "B" = "b";

        /* Block comment for C */

        "C" = "c";
        "#;
        let parsed = Format::from_str(content, "Localizable.strings").unwrap();
        assert_eq!(parsed.pairs.len(), 3);
        assert_eq!(parsed.pairs[0].comment.as_deref(), Some("Comment for A"));
        assert_eq!(parsed.pairs[1].comment, None);
        assert_eq!(parsed.pairs[2].comment.as_deref(), Some("Block comment for C"));
    }

    #[test]
    fn test_leading_block_comment_on_statement_line() {
        let content = r#"
        // Above
        /* inline note */ "a" = "A";
        /* note */ not a statement
        "c" = "C";
        "#;
        let parsed = Format::from_str(content, "Localizable.strings").unwrap();
        let pairs = parsed
            .pairs
            .iter()
            .map(|p| (p.key.as_str(), p.comment.as_deref()))
            .collect::<Vec<_>>();
        assert_eq!(
            pairs,
            vec![("a", Some("inline note")), ("c", None)]
        );
    }

    #[test]
    fn test_escapes_inside_strings() {
        let content = r#""say \"hi\"" = "tab\there\\ and\nnewline\r";"#;
        let parsed = Format::from_str(content, "Localizable.strings").unwrap();
        assert_eq!(parsed.pairs[0].key, "say \"hi\"");
        assert_eq!(parsed.pairs[0].value, "tab\there\\ and\nnewline\r");
    }

    #[test]
    fn test_blank_lines_and_ignored_malformed_lines() {
        let content = r#"

        "good" = "yes";
        bad line without equals
        "missing" = "semicolon"
        "trailing" = "ok"; // not attached anywhere
        "another" = "ok";
        "#;
        let parsed = Format::from_str(content, "Localizable.strings").unwrap();
        let keys = parsed.pairs.iter().map(|p| p.key.as_str()).collect::<Vec<_>>();
        assert_eq!(keys, vec!["good", "trailing", "another"]);
        assert!(parsed.pairs.iter().all(|p| p.comment.is_none()));
    }

    #[test]
    fn test_decode_utf16_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "\"k\" = \"v\";".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let parsed = Format::from_bytes(&bytes, "Localizable.strings").unwrap();
        assert_eq!(parsed.pairs[0].key, "k");
        assert_eq!(parsed.pairs[0].value, "v");
    }

    #[test]
    fn test_decode_utf16_without_bom() {
        let mut bytes = Vec::new();
        for unit in "\"k\" = \"v\";".encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        assert_eq!(decode(&bytes, "x.strings").unwrap(), "\"k\" = \"v\";");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode(&[0x22, 0xFF, 0xC3], "x.strings").unwrap_err();
        assert!(matches!(err, Error::UnreadableEncoding { .. }));
    }

    #[test]
    fn test_decode_rejects_latin1() {
        // Even length, so it would pass as UTF-16 code units.
        let bytes = b"\"a\" = \"caf\xe9\";\n";
        assert_eq!(bytes.len() % 2, 0);
        let err = decode(bytes, "fr.lproj/Menu.strings").unwrap_err();
        match err {
            Error::UnreadableEncoding { path } => assert_eq!(path, "fr.lproj/Menu.strings"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_infer_region_and_table_name() {
        assert_eq!(
            infer_region("App/en.lproj/Localizable.strings").as_deref(),
            Some("en")
        );
        assert_eq!(
            infer_region("App/pt-BR.lproj/Main.strings").as_deref(),
            Some("pt-BR")
        );
        assert_eq!(infer_region("App/Resources/Localizable.strings"), None);
        assert_eq!(infer_region("Localizable.strings"), None);
        assert_eq!(table_name("App/en.lproj/Settings.strings"), "Settings");
    }

    #[test]
    fn test_region_folders() {
        assert!(in_base_folder("App/Base.lproj/Main.strings"));
        assert!(!in_base_folder("App/en.lproj/Main.strings"));
        assert!(in_development_folder("App/en.lproj/Main.strings", None));
        assert!(in_development_folder("App/en_GB.lproj/Main.strings", Some("en-GB")));
        assert!(!in_development_folder("App/fr.lproj/Main.strings", Some("en")));
        assert!(!in_development_folder("App/Base.lproj/Main.strings", Some("en")));
        assert!(!in_development_folder("Main.strings", Some("en")));
    }

    #[test]
    fn test_parse_requires_a_region() {
        let err = parse(r#""a" = "b";"#, None, "Resources/Localizable.strings").unwrap_err();
        assert!(matches!(err, Error::MissingDevelopmentRegion { .. }));
    }

    #[test]
    fn test_parse_uses_inferred_region() {
        let entries = parse(
            r#""a" = "%d apples";"#,
            None,
            "App/en.lproj/Localizable.strings",
        )
        .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].table, "Localizable");
        assert_eq!(entries[0].source_location, "App/en.lproj/Localizable.strings:1");
        assert_eq!(entries[0].arguments[0].kind, ArgumentKind::SignedInteger);
    }

    #[test]
    fn test_parse_skips_other_regions() {
        let entries = parse(r#""a" = "b";"#, Some("en"), "App/fr.lproj/Localizable.strings")
            .unwrap();
        assert!(entries.is_empty());

        let entries = parse(r#""a" = "b";"#, Some("en_US"), "App/en-US.lproj/Localizable.strings")
            .unwrap();
        assert_eq!(entries.len(), 1);

        let entries = parse(r#""a" = "b";"#, Some("en"), "App/Base.lproj/Localizable.strings")
            .unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_parse_drops_unsafe_and_sorts() {
        let content = r#"
        "zeta" = "last";
        "newline" = "a\nb";
        "quote" = "say \"hi\"";
        "alpha" = "first";
        "#;
        let entries = parse(content, Some("en"), "Localizable.strings").unwrap();
        let keys = entries.iter().map(|e| e.key.as_str()).collect::<Vec<_>>();
        assert_eq!(keys, vec!["alpha", "zeta"]);
    }
}
