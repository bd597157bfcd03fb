use langgen::identifier::{EMPTY_IDENTIFIER, sanitize, synthesize_labels, synthesize_name};
use langgen::placeholder::parse;
use langgen::validation::{CharacterSet, validate};
use langgen::{FormatArgument, LocalizedEntry};
use proptest::prelude::*;
use std::collections::HashSet;

fn strict_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ' ')
}

fn entry(key: &str, default_text: &str) -> LocalizedEntry {
    LocalizedEntry {
        key: key.to_string(),
        table: "Localizable".to_string(),
        default_text: default_text.to_string(),
        comment: None,
        arguments: parse(default_text),
        source_location: "Localizable.strings:1".to_string(),
    }
}

proptest! {
    #[test]
    fn literal_text_has_no_arguments(text in "[^%]{1,40}") {
        prop_assert!(parse(&text).is_empty());
    }

    #[test]
    fn arguments_are_sorted_by_position(text in "([a-z ]{0,4}%([1-9]\\$)?(@|d|lld|f|u|c|%)){0,6}") {
        let positions = parse(&text)
            .into_iter()
            .map(|argument: FormatArgument| argument.position)
            .collect::<Vec<_>>();
        let mut sorted = positions.clone();
        sorted.sort();
        prop_assert_eq!(positions, sorted);
    }

    #[test]
    fn strict_validation_matches_character_set(text in "\\PC{0,30}") {
        let expected = text.chars().all(strict_char);
        prop_assert_eq!(validate(&text, CharacterSet::Strict).is_ok(), expected);
    }

    #[test]
    fn strict_set_is_subset_of_localized_text(text in "[A-Za-z0-9_./ -]{0,30}") {
        prop_assert!(validate(&text, CharacterSet::Strict).is_ok());
        prop_assert!(validate(&text, CharacterSet::LocalizedText).is_ok());
    }

    #[test]
    fn sanitize_is_total_and_identifier_shaped(name in "\\PC{0,30}") {
        let identifier = sanitize(&name);
        let bare = identifier.trim_matches('`');
        prop_assert!(!bare.is_empty());
        prop_assert!(bare.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        prop_assert!(!bare.starts_with(|c: char| c.is_ascii_digit()));
        if !name.chars().any(|c| c.is_ascii_alphanumeric()) {
            prop_assert_eq!(identifier.as_str(), EMPTY_IDENTIFIER);
        }
    }

    #[test]
    fn separators_are_interchangeable(words in prop::collection::vec("[a-z][a-z0-9]{0,6}", 1..4)) {
        let dashed = sanitize(&words.join("-"));
        let underscored = sanitize(&words.join("_"));
        let dotted = sanitize(&words.join("."));
        prop_assert_eq!(&dashed, &underscored);
        prop_assert_eq!(&dashed, &dotted);
    }

    #[test]
    fn labels_are_unique_and_stable(key in "[a-z._-]{1,20}", text in "([a-z ]{0,4}%(@|d|lld|f|c|p)){0,6}") {
        let subject = entry(&key, &text);
        let labels = synthesize_labels(&subject);
        prop_assert_eq!(labels.len(), subject.arguments.len());
        let unique = labels.iter().collect::<HashSet<_>>();
        prop_assert_eq!(unique.len(), labels.len());
        prop_assert_eq!(&labels, &synthesize_labels(&subject));
        prop_assert_eq!(synthesize_name(&subject), synthesize_name(&subject));
    }
}
