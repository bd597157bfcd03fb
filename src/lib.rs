#![forbid(unsafe_code)]
//! Localization extraction and identifier synthesis for generated string accessors.
//!
//! Reads Apple `.strings` tables and `.xcstrings` catalogs, resolves the
//! development-language text and printf-style arguments of every entry, and
//! synthesizes unique, keyword-escaped Swift identifiers and parameter labels
//! for them. Anything whose characters could corrupt generated source is
//! dropped before it reaches the emitter.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use langgen::{Codec, ReadOptions};
//!
//! let mut codec = Codec::new();
//! codec.read_file_by_extension("en.lproj/Localizable.strings", &ReadOptions::new())?;
//! codec.read_file_by_extension("Settings.xcstrings", &ReadOptions::new())?;
//!
//! for (table, entries) in codec.generate()? {
//!     for generated in entries {
//!         println!("{table}.{}({})", generated.identifier, generated.labels.join(", "));
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Pipeline
//!
//! - [`placeholder`]: printf specifier scanning and classification
//! - [`formats`]: `.strings` and `.xcstrings` parsing and extraction
//! - [`validation`]: character-set checks on keys and values
//! - [`identifier`]: name and label synthesis
//! - [`collision`]: duplicate identifier detection
//! - [`codec`]: per-table aggregation tying the above together

pub mod codec;
pub mod collision;
pub mod error;
pub mod formats;
pub mod identifier;
pub mod placeholder;
pub mod read_options;
pub mod traits;
pub mod types;
pub mod validation;

// Re-export most used types for easy consumption
pub use crate::{
    codec::Codec,
    error::Error,
    formats::{FormatType, infer_format_from_extension},
    read_options::ReadOptions,
    types::{ArgumentKind, FormatArgument, GeneratedEntry, LocalizedEntry},
};
