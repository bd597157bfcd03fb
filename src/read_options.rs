//! Options for reading localization files into a [`crate::Codec`].

/// Read behavior options for [`crate::Codec`] file-loading APIs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReadOptions {
    /// Development region for `.strings` tables outside a `.lproj` folder.
    pub development_region: Option<String>,
    /// Table name to use instead of the file stem.
    pub table_name: Option<String>,
}

impl ReadOptions {
    /// Creates default read options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the development region.
    pub fn with_development_region(mut self, development_region: Option<String>) -> Self {
        self.development_region = development_region;
        self
    }

    /// Overrides the table name.
    pub fn with_table_name(mut self, table_name: Option<String>) -> Self {
        self.table_name = table_name;
        self
    }
}
