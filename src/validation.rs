//! Character-set validation for everything that ends up inside generated source.
//!
//! Only printable ASCII passes, and never `"` or `\`, so a key or value can be
//! embedded in a string literal or identifier without escaping.

use crate::error::Error;

/// Punctuation allowed in human-readable text on top of [`CharacterSet::Strict`].
const LOCALIZED_TEXT_PUNCTUATION: &str = "%@$#!?,;:()[]{}*+<>=&|^~`'";

/// The two character sets input is validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterSet {
    /// ASCII letters, digits, `-`, `_`, `.`, `/` and space. For filesystem-derived names.
    Strict,
    /// [`CharacterSet::Strict`] plus printf and sentence punctuation. For keys and values.
    LocalizedText,
}

impl CharacterSet {
    pub fn contains(self, c: char) -> bool {
        let strict = c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ' ');
        match self {
            CharacterSet::Strict => strict,
            CharacterSet::LocalizedText => strict || LOCALIZED_TEXT_PUNCTUATION.contains(c),
        }
    }
}

/// Fails on the first character of `text` outside `allowed`.
pub fn validate(text: &str, allowed: CharacterSet) -> Result<(), Error> {
    match text.chars().find(|&c| !allowed.contains(c)) {
        Some(character) => Err(Error::unsafe_string(text, character)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offending(text: &str, allowed: CharacterSet) -> Option<char> {
        match validate(text, allowed) {
            Ok(()) => None,
            Err(Error::UnsafeString { character, .. }) => Some(character),
            Err(other) => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_strict_accepts_path_like_names() {
        assert!(validate("Images/icon-home_2x.png", CharacterSet::Strict).is_ok());
        assert!(validate("", CharacterSet::Strict).is_ok());
    }

    #[test]
    fn test_strict_rejects_punctuation() {
        assert_eq!(offending("50%", CharacterSet::Strict), Some('%'));
        assert_eq!(offending("a@b", CharacterSet::Strict), Some('@'));
    }

    #[test]
    fn test_localized_text_accepts_format_punctuation() {
        let text = "Hello, %1$@! You have %2$lld new (unread) messages; isn't it great?";
        assert!(validate(text, CharacterSet::LocalizedText).is_ok());
    }

    #[test]
    fn test_both_sets_reject_quotes_backslash_and_controls() {
        for set in [CharacterSet::Strict, CharacterSet::LocalizedText] {
            assert_eq!(offending("say \"hi\"", set), Some('"'));
            assert_eq!(offending("back\\slash", set), Some('\\'));
            assert_eq!(offending("line\nbreak", set), Some('\n'));
            assert_eq!(offending("cr\r", set), Some('\r'));
            assert_eq!(offending("nul\0", set), Some('\0'));
        }
    }

    #[test]
    fn test_rejects_homoglyphs() {
        // Cyrillic 'а' looks like ASCII 'a'.
        assert_eq!(offending("p\u{0430}ssword", CharacterSet::Strict), Some('\u{0430}'));
        assert_eq!(offending("Café", CharacterSet::LocalizedText), Some('é'));
    }

    #[test]
    fn test_reports_first_violation() {
        assert_eq!(offending("a\"b\\c", CharacterSet::LocalizedText), Some('"'));
    }
}
