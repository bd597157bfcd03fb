//! Printf-style placeholder scanning and classification.
//!
//! - [`classify`] maps a length modifier + conversion letter to an [`ArgumentKind`].
//! - [`parse`] turns a format string into position-sorted [`FormatArgument`]s.
//! - [`strip_specifiers`] removes the same placeholders from text, for naming.
//! - [`infer_label`] suggests a parameter label for an unnamed argument.

use crate::types::{ArgumentKind, FormatArgument};

const INTEGER_LENGTHS: &[&str] = &["", "h", "hh", "l", "ll", "j", "t", "z"];
const FLOAT_LENGTHS: &[&str] = &["", "l", "L"];
const CHARACTER_LENGTHS: &[&str] = &["", "l"];

const INTEGER_VOCABULARY: &[&str] = &[
    "count", "number", "total", "amount", "quantity", "index", "id",
];
const STRING_VOCABULARY: &[&str] = &["name", "title", "message", "text", "value", "label", "user"];
const FLOAT_VOCABULARY: &[&str] = &["amount", "price", "value", "rate", "percentage"];

/// Classifies a specifier with the `%`, flags, width and precision already stripped.
///
/// Never fails; anything unrecognized (including `%p` and `%s`) is [`ArgumentKind::Unknown`].
pub fn classify(specifier: &str) -> ArgumentKind {
    let Some(conversion) = specifier.chars().last() else {
        return ArgumentKind::Unknown(specifier.to_string());
    };
    let length = &specifier[..specifier.len() - conversion.len_utf8()];

    match conversion {
        '@' if length.is_empty() => ArgumentKind::String,
        'd' | 'D' | 'i' | 'I' if INTEGER_LENGTHS.contains(&length) => ArgumentKind::SignedInteger,
        'u' | 'U' | 'o' | 'O' | 'x' | 'X' if INTEGER_LENGTHS.contains(&length) => {
            ArgumentKind::UnsignedInteger
        }
        'f' | 'F' | 'e' | 'E' | 'g' | 'G' | 'a' | 'A' if FLOAT_LENGTHS.contains(&length) => {
            ArgumentKind::FloatingPoint
        }
        'c' | 'C' if CHARACTER_LENGTHS.contains(&length) => ArgumentKind::Character,
        _ => ArgumentKind::Unknown(specifier.to_string()),
    }
}

/// A placeholder found by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    /// Byte range of the whole placeholder in the scanned text.
    start: usize,
    end: usize,
    /// `None` for an escaped `%%`.
    spec: Option<TokenSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TokenSpec {
    explicit_position: Option<usize>,
    /// Length modifier + conversion letter.
    specifier: String,
}

/// Scans for `% [N$] [flags] [width] [.precision] [length] conversion` and `%%`.
fn scan(input: &str) -> Vec<Token> {
    let bytes = input.as_bytes();
    let mut i = 0;
    let mut out = Vec::new();

    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        // Escaped percent
        if i + 1 < bytes.len() && bytes[i + 1] == b'%' {
            out.push(Token {
                start: i,
                end: i + 2,
                spec: None,
            });
            i += 2;
            continue;
        }

        let mut j = i + 1;

        // Optional positional index: digits followed by '$'
        let mut explicit_position = None;
        let start_digits = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > start_digits && j < bytes.len() && bytes[j] == b'$' {
            match input[start_digits..j].parse::<usize>() {
                Ok(position) if position > 0 => explicit_position = Some(position),
                // Positions are 1-based; `%0$d` is literal text.
                _ => {
                    i += 1;
                    continue;
                }
            }
            j += 1;
        } else {
            j = i + 1;
        }

        // Flags
        while j < bytes.len() && matches!(bytes[j], b'-' | b'+' | b'#' | b'0') {
            j += 1;
        }
        // Width
        if j < bytes.len() && bytes[j] == b'*' {
            j += 1;
        } else {
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
        }
        // Precision
        if j < bytes.len() && bytes[j] == b'.' {
            j += 1;
            if j < bytes.len() && bytes[j] == b'*' {
                j += 1;
            } else {
                while j < bytes.len() && bytes[j].is_ascii_digit() {
                    j += 1;
                }
            }
        }
        // Length modifiers
        let length_start = j;
        while j < bytes.len() && matches!(bytes[j], b'h' | b'l' | b'L' | b'q' | b'j' | b'z' | b't')
        {
            j += 1;
        }
        if j - length_start > 2 {
            // No conversion takes more than two modifier letters; treat as literal text.
            i += 1;
            continue;
        }

        if j < bytes.len() && (bytes[j].is_ascii_alphabetic() || bytes[j] == b'@') {
            out.push(Token {
                start: i,
                end: j + 1,
                spec: Some(TokenSpec {
                    explicit_position,
                    specifier: input[length_start..=j].to_string(),
                }),
            });
            i = j + 1;
            continue;
        }

        // Not a recognized placeholder; skip this '%'
        i += 1;
    }

    out
}

/// Extracts the arguments of a format string, sorted by position.
///
/// Explicit `N$` positions win; every other placeholder takes the running
/// counter, which advances once per non-escaped placeholder.
pub fn parse(text: &str) -> Vec<FormatArgument> {
    let mut counter = 0;
    let mut arguments = scan(text)
        .into_iter()
        .filter_map(|token| token.spec)
        .map(|spec| {
            counter += 1;
            let position = spec.explicit_position.unwrap_or(counter);
            FormatArgument::from_specifier(position, &spec.specifier)
        })
        .collect::<Vec<_>>();

    arguments.sort_by_key(|argument| argument.position);
    arguments
}

/// Removes every placeholder (including `%%`) from `text`, leaving a space in its place.
pub fn strip_specifiers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for token in scan(text) {
        out.push_str(&text[last..token.start]);
        out.push(' ');
        last = token.end;
    }
    out.push_str(&text[last..]);
    out
}

/// Suggests a parameter label for an argument that the source did not name.
///
/// Looks for a kind-specific word in the key segments, then in the default text,
/// then falls back to a position-based name. The result is advisory only.
pub fn infer_label(key: &str, default_text: &str, kind: &ArgumentKind, position: usize) -> String {
    let vocabulary: &[&str] = match kind {
        ArgumentKind::SignedInteger | ArgumentKind::UnsignedInteger => INTEGER_VOCABULARY,
        ArgumentKind::String => STRING_VOCABULARY,
        ArgumentKind::FloatingPoint => FLOAT_VOCABULARY,
        ArgumentKind::Character => return "char".to_string(),
        ArgumentKind::Unknown(_) => return format!("arg{}", position),
    };

    let key_segments = key
        .split(['.', '-', '_'])
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>();
    let text_words = strip_specifiers(default_text)
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>();

    let hit = key_segments
        .iter()
        .chain(text_words.iter())
        .find(|word| vocabulary.contains(&word.as_str()));
    if let Some(word) = hit {
        return word.clone();
    }

    match (kind, position) {
        (ArgumentKind::SignedInteger | ArgumentKind::UnsignedInteger, 1) => "count".to_string(),
        (ArgumentKind::FloatingPoint, 1) => "amount".to_string(),
        (_, 1) => "value".to_string(),
        _ => format!("value{}", position),
    }
}
