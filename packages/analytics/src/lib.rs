#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Analytical query engine over the incident dataset.
//!
//! Each public function in [`tools`] answers one query. Functions take the
//! shared [`DatasetStore`](incident_stats_dataset::DatasetStore) plus typed
//! parameters, make a single pass over the immutable records, and return
//! typed rows. [`format`] turns those rows into flat JSON records for the
//! HTTP layer.

pub mod format;
pub mod tools;

use incident_stats_catalog::CatalogError;
use thiserror::Error;

/// Errors that can occur during analytics operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    /// A query arrived before the dataset finished loading.
    #[error("Dataset is not loaded")]
    DatasetNotLoaded,

    /// A state in the dataset has no state catalog entry.
    #[error("Unknown state '{0}': no entry in the state catalog")]
    UnknownState(String),

    /// A month number has no month catalog entry.
    #[error("Unknown month number {0}")]
    UnknownMonth(i64),

    /// A query parameter is malformed.
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Description of what went wrong.
        message: String,
    },

    /// A result row could not be converted to a flat record.
    #[error("Format error: {message}")]
    Format {
        /// Description of what went wrong.
        message: String,
    },
}

impl AnalyticsError {
    /// Stable machine-readable identifier for this error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DatasetNotLoaded => "dataset_not_loaded",
            Self::UnknownState(_) => "unknown_state",
            Self::UnknownMonth(_) => "unknown_month",
            Self::InvalidParameter { .. } => "invalid_parameter",
            Self::Format { .. } => "format",
        }
    }
}

impl From<CatalogError> for AnalyticsError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::UnknownMonth(number) => Self::UnknownMonth(number),
            CatalogError::UnknownState(name) => Self::UnknownState(name),
        }
    }
}
