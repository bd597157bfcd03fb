//! This module provides the [`Codec`] struct, which aggregates the entries of
//! every table read from `.strings` and `.xcstrings` files and turns them into
//! identifier-synthesized, collision-checked [`GeneratedEntry`] lists for the
//! emitter.
//!
//! Files can be read in any order; collisions are only checked in
//! [`Codec::generate`], once every file contributing to a table is known.
//! A `Base.lproj` table only counts while the development region's own
//! `.lproj` folder has not provided the same table.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::Path,
};

use log::{debug, info};

use crate::{
    collision,
    error::Error,
    formats::{FormatType, XcstringsFormat, infer_format_from_extension, strings},
    identifier::{synthesize_labels, synthesize_name},
    read_options::ReadOptions,
    traits::{Extract, Parser},
    types::{GeneratedEntry, LocalizedEntry},
    validation::{CharacterSet, validate},
};

/// Collects localized entries per table.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    /// Entries of each table, sorted by key.
    tables: BTreeMap<String, Vec<LocalizedEntry>>,
    /// Paths of the `Base.lproj` files read into each table.
    base_sources: BTreeMap<String, BTreeSet<String>>,
    /// Tables provided by the development region's own `.lproj` folder.
    regional_tables: BTreeSet<String>,
}

impl Codec {
    /// Creates a new, empty `Codec`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries collected so far, per table.
    pub fn tables(&self) -> &BTreeMap<String, Vec<LocalizedEntry>> {
        &self.tables
    }

    /// Adds already extracted entries, each to its own table.
    pub fn add_entries(&mut self, entries: impl IntoIterator<Item = LocalizedEntry>) {
        for entry in entries {
            self.tables
                .entry(entry.table.clone())
                .or_default()
                .push(entry);
        }
        for entries in self.tables.values_mut() {
            entries.sort_by(|a, b| a.key.cmp(&b.key));
        }
    }

    /// Reads a file by inferring its format from the extension.
    ///
    /// Returns the number of entries added.
    pub fn read_file_by_extension<P: AsRef<Path>>(
        &mut self,
        path: P,
        options: &ReadOptions,
    ) -> Result<usize, Error> {
        let path = path.as_ref();
        let format_type = infer_format_from_extension(path)
            .ok_or_else(|| Error::UnknownFormat(path.display().to_string()))?;
        self.read_file_by_type(path, format_type, options)
    }

    /// Reads a file with an explicit format type.
    ///
    /// A region carried by `format_type` takes precedence over the one in `options`.
    pub fn read_file_by_type<P: AsRef<Path>>(
        &mut self,
        path: P,
        format_type: FormatType,
        options: &ReadOptions,
    ) -> Result<usize, Error> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        self.read_bytes_by_type(&bytes, &path.display().to_string(), format_type, options)
    }

    /// Reads file contents handed over by a caller that already loaded them.
    ///
    /// `path` is used for table naming, region inference and diagnostics.
    /// The table name must consist of the strict character set.
    pub fn read_bytes_by_type(
        &mut self,
        bytes: &[u8],
        path: &str,
        format_type: FormatType,
        options: &ReadOptions,
    ) -> Result<usize, Error> {
        let table = options
            .table_name
            .clone()
            .unwrap_or_else(|| strings::table_name(path));
        validate(&table, CharacterSet::Strict).map_err(|source| Error::UnsafeTableName {
            path: path.to_string(),
            source: Box::new(source),
        })?;

        let mut entries = match format_type {
            FormatType::Strings(region) => {
                let content = strings::decode(bytes, path)?;
                let region = region.or_else(|| options.development_region.clone());
                let entries = strings::parse(&content, region.as_deref(), path)?;

                if strings::in_base_folder(path) {
                    if self.regional_tables.contains(&table) {
                        debug!("skipping {}: table {} has a development region folder", path, table);
                        return Ok(0);
                    }
                    self.base_sources
                        .entry(table.clone())
                        .or_default()
                        .insert(path.to_string());
                } else if strings::in_development_folder(path, region.as_deref()) {
                    self.drop_base_entries(&table);
                }
                entries
            }
            FormatType::Xcstrings => XcstringsFormat::from_bytes(bytes, path)?.extract(&table, path),
        };
        for entry in &mut entries {
            entry.table = table.clone();
        }

        let count = entries.len();
        info!("read {} entries for table {} from {}", count, table, path);
        self.add_entries(entries);
        Ok(count)
    }

    /// Marks `table` as provided by the development region's folder and removes
    /// whatever `Base.lproj` contributed to it.
    fn drop_base_entries(&mut self, table: &str) {
        self.regional_tables.insert(table.to_string());
        let Some(sources) = self.base_sources.remove(table) else {
            return;
        };

        if let Some(entries) = self.tables.get_mut(table) {
            // Legacy table locations are `path:line`.
            entries.retain(|entry| {
                !entry
                    .source_location
                    .rsplit_once(':')
                    .is_some_and(|(source, _)| sources.contains(source))
            });
            if entries.is_empty() {
                self.tables.remove(table);
            }
        }
        debug!("dropped Base.lproj entries of table {}", table);
    }

    /// Synthesizes identifiers and labels for every entry, table by table.
    ///
    /// Fails with [`Error::DuplicateIdentifier`] if two entries of one table end
    /// up with the same identifier.
    pub fn generate(&self) -> Result<BTreeMap<String, Vec<GeneratedEntry>>, Error> {
        let mut generated = BTreeMap::new();

        for (table, entries) in &self.tables {
            let table_entries = entries
                .iter()
                .map(|entry| GeneratedEntry {
                    identifier: synthesize_name(entry),
                    labels: synthesize_labels(entry),
                    entry: entry.clone(),
                })
                .collect::<Vec<_>>();

            collision::detect(
                table_entries.iter().map(|generated| {
                    (
                        generated.identifier.as_str(),
                        generated.entry.source_location.as_str(),
                    )
                }),
                &format!("{} string", table),
            )?;

            generated.insert(table.clone(), table_entries);
        }

        Ok(generated)
    }
}
