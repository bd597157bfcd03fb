//! Identifier synthesis: turns keys and default texts into valid Swift names.
//!
//! [`sanitize`] is the shared rule for every generated identifier. It is also
//! what collision detection compares, so two keys that sanitize to the same
//! name collide.

use std::collections::HashSet;

use lazy_static::lazy_static;

use crate::{
    placeholder::{infer_label, strip_specifiers},
    types::LocalizedEntry,
};

/// Returned by [`sanitize`] when the input has no letter or digit at all.
pub const EMPTY_IDENTIFIER: &str = "unnamed";

/// Base name used when neither the key nor the default text yields a word.
const FALLBACK_BASE_NAME: &str = "string";

const MAX_DEFAULT_TEXT_WORDS: usize = 3;

lazy_static! {
    /// Swift keywords, spelled as the language spells them.
    static ref RESERVED_WORDS: HashSet<&'static str> = [
        // Declarations
        "actor", "associatedtype", "class", "deinit", "enum", "extension", "fileprivate",
        "func", "import", "init", "inout", "internal", "let", "macro", "open", "operator",
        "package", "private", "precedencegroup", "protocol", "public", "rethrows", "static",
        "struct", "subscript", "typealias", "var",
        // Statements
        "break", "case", "catch", "continue", "default", "defer", "do", "else", "fallthrough",
        "for", "guard", "if", "in", "repeat", "return", "throw", "switch", "where", "while",
        // Expressions and types
        "any", "as", "async", "await", "false", "is", "nil", "self", "super", "throws", "true",
        "try", "type",
        // Context-sensitive
        "associativity", "borrowing", "consume", "consuming", "convenience", "didSet",
        "dynamic", "final", "get", "indirect", "infix", "isolated", "lazy", "left", "mutating",
        "none", "nonisolated", "nonmutating", "optional", "override", "postfix", "precedence",
        "prefix", "required", "right", "set", "some", "unowned", "weak", "willSet",
    ]
    .into_iter()
    .collect();
}

/// Whether `word` spells a reserved word, ignoring case.
pub fn is_reserved(word: &str) -> bool {
    RESERVED_WORDS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(word))
}

/// Converts an arbitrary name into a camel-cased, keyword-escaped identifier.
///
/// - `icon-home`, `icon_home` and `icon.home` all become `iconHome`
/// - `URLSession` becomes `urlSession`, `HTTP2_client` becomes `http2Client`
/// - `2x_logo` becomes `_2xLogo`
/// - `class` becomes `` `class` ``
pub fn sanitize(name: &str) -> String {
    let segments = name
        .split(|c: char| matches!(c, '-' | '_' | '.') || c.is_whitespace())
        .map(|segment| {
            segment
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .collect::<String>()
        })
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>();

    let Some((head, tail)) = segments.split_first() else {
        return EMPTY_IDENTIFIER.to_string();
    };

    let mut identifier = lowercase_leading_acronym(head);
    for segment in tail {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            identifier.push(first.to_ascii_uppercase());
            identifier.push_str(&chars.as_str().to_ascii_lowercase());
        }
    }

    if identifier.starts_with(|c: char| c.is_ascii_digit()) {
        identifier.insert(0, '_');
    }

    // A single word is a keyword in any case; a camel merge only on an exact match.
    let reserved = if tail.is_empty() {
        is_reserved(&identifier)
    } else {
        RESERVED_WORDS.contains(identifier.as_str())
    };
    if reserved {
        format!("`{}`", identifier)
    } else {
        identifier
    }
}

/// Lowercases the leading uppercase run of `segment`.
///
/// A run followed by a lowercase letter keeps its last capital, which starts the
/// next word (`URLSession` -> `urlSession`).
fn lowercase_leading_acronym(segment: &str) -> String {
    let run = segment
        .chars()
        .take_while(char::is_ascii_uppercase)
        .count();
    let continues_lowercase = segment
        .chars()
        .nth(run)
        .is_some_and(|c| c.is_ascii_lowercase());
    let lowered = if run > 1 && continues_lowercase {
        run - 1
    } else {
        run
    };

    // The run is ASCII, so char counts equal byte offsets here.
    let mut out = segment[..lowered].to_ascii_lowercase();
    out.push_str(&segment[lowered..]);
    out
}

/// Synthesizes the accessor name of an entry.
///
/// Placeholders are stripped from the key first. A key without letters (e.g. `%@`)
/// borrows up to three words from the default text instead.
pub fn synthesize_name(entry: &LocalizedEntry) -> String {
    let key = strip_specifiers(&entry.key)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let base = if key.chars().any(|c| c.is_ascii_alphabetic()) {
        key
    } else {
        let text = strip_specifiers(&entry.default_text);
        let words = text
            .split_whitespace()
            .filter(|word| word.starts_with(|c: char| c.is_ascii_alphabetic()))
            .take(MAX_DEFAULT_TEXT_WORDS)
            .collect::<Vec<_>>();
        if words.is_empty() {
            FALLBACK_BASE_NAME.to_string()
        } else {
            words.join(" ")
        }
    };

    sanitize(&base)
}

/// Synthesizes one parameter label per argument, unique within the entry.
///
/// Explicit labels (catalog substitutions) win over inferred ones. Repeats get
/// an ascending suffix: `count`, `count2`, `count3`.
pub fn synthesize_labels(entry: &LocalizedEntry) -> Vec<String> {
    let mut used = HashSet::new();

    entry
        .arguments
        .iter()
        .enumerate()
        .map(|(index, argument)| {
            let candidate = argument.label.clone().unwrap_or_else(|| {
                infer_label(&entry.key, &entry.default_text, &argument.kind, index + 1)
            });
            claim_unique(candidate, &mut used)
        })
        .collect()
}

fn claim_unique(candidate: String, used: &mut HashSet<String>) -> String {
    if used.insert(candidate.clone()) {
        return candidate;
    }

    let base = candidate.trim_matches('`');
    let mut suffix = 2;
    loop {
        let label = format!("{}{}", base, suffix);
        if used.insert(label.clone()) {
            return label;
        }
        suffix += 1;
    }
}
