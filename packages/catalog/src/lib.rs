#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Static reference catalogs consulted by the incident query engine.
//!
//! Two fixed lookups live here: calendar month numbers to English month
//! names, and full US state names to their two-letter postal codes. Both
//! are read-only and never change at runtime.

pub mod month;
pub mod state;

pub use month::{Month, month_name};
pub use state::{STATE_NAMES, state_code};

use thiserror::Error;

/// Errors raised by a catalog lookup miss.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Month number outside `1..=12`.
    #[error("Unknown month number {0}: expected 1-12")]
    UnknownMonth(i64),

    /// State name with no catalog entry.
    #[error("Unknown state '{0}': no entry in the state catalog")]
    UnknownState(String),
}
