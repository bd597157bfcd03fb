//! Duplicate identifier detection within one namespace.

use std::collections::BTreeMap;

use crate::error::Error;

/// Fails if two or more source locations produced the same identifier.
///
/// `entries` pairs each synthesized identifier with the location it came from.
/// The first duplicated identifier (in lexicographic order) is reported with
/// every one of its locations, in input order.
pub fn detect<I, S, L>(entries: I, category: &str) -> Result<(), Error>
where
    I: IntoIterator<Item = (S, L)>,
    S: Into<String>,
    L: Into<String>,
{
    let mut buckets = BTreeMap::<String, Vec<String>>::new();
    for (identifier, location) in entries {
        buckets
            .entry(identifier.into())
            .or_default()
            .push(location.into());
    }

    match buckets.into_iter().find(|(_, locations)| locations.len() > 1) {
        Some((identifier, locations)) => Err(Error::DuplicateIdentifier {
            category: category.to_string(),
            identifier,
            locations,
        }),
        None => Ok(()),
    }
}
