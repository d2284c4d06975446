#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Load-once store for the incident dataset.
//!
//! The dataset is parsed from CSV into typed [`IncidentRecord`]s, validated,
//! and installed into a [`DatasetStore`] exactly once. After installation
//! the store only hands out shared references, so any number of readers can
//! query it concurrently without locking. A failed load leaves the store
//! empty; no partially parsed dataset is ever visible.

mod parse;
pub mod source;
mod store;

pub use incident_stats_dataset_models::IncidentRecord;
pub use source::{DEFAULT_DATASET_URL, DatasetSource, load, load_into};
pub use store::DatasetStore;

use thiserror::Error;

/// Errors that can occur while loading the dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Downloading the dataset failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Reading a local dataset file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The source is not well-formed CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The header row lacks one or more required columns.
    #[error("Missing required columns: {}", columns.join(", "))]
    MissingColumns {
        /// Names of the missing columns.
        columns: Vec<String>,
    },

    /// A row holds a value that cannot be converted to its column type.
    #[error("Invalid value on line {line}: {message}")]
    InvalidRow {
        /// 1-based line number in the source file.
        line: u64,
        /// Description of what went wrong.
        message: String,
    },

    /// A row carries a month number with no catalog entry.
    #[error("Unknown month on line {line}: {source}")]
    UnknownMonth {
        /// 1-based line number in the source file.
        line: u64,
        /// The underlying catalog miss.
        source: incident_stats_catalog::CatalogError,
    },

    /// The source has a header but no data rows.
    #[error("Dataset contains no rows")]
    Empty,

    /// A dataset has already been installed into the store.
    #[error("Dataset is already loaded")]
    AlreadyLoaded,
}

/// An immutable, validated collection of incident records.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<IncidentRecord>,
}

impl Dataset {
    /// Parses and validates a CSV source.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the CSV is malformed, required columns are
    /// missing, a value cannot be converted, a month number is outside
    /// `1..=12`, or the file has no data rows.
    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self, DatasetError> {
        let records = parse::parse_records(bytes)?;
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }
        Ok(Self { records })
    }

    /// All records in source order.
    #[must_use]
    pub fn records(&self) -> &[IncidentRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records. Always `false` for a dataset
    /// built by [`Dataset::from_csv_bytes`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
