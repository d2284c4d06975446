#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the incident stats server.
//!
//! Query result bodies are built by the analytics formatter; this crate
//! only holds the query-string parameter shapes and the service-level
//! bodies (health, errors).

use incident_stats_analytics_models::DEFAULT_TOP_STATES_LIMIT;
use serde::{Deserialize, Serialize};

/// Query parameters for endpoints scoped to a year and a state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct YearStateParams {
    /// Incident year.
    pub year: i32,
    /// Full state name.
    pub state: String,
}

/// Query parameters for endpoints scoped to a state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StateParams {
    /// Full state name.
    pub state: String,
}

/// Query parameters for endpoints scoped to a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct YearParams {
    /// Incident year.
    pub year: i32,
}

/// Query parameters for the top-states endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LimitParams {
    /// Maximum number of states to return.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

const fn default_limit() -> i64 {
    DEFAULT_TOP_STATES_LIMIT
}

impl Default for LimitParams {
    fn default() -> Self {
        Self {
            limit: default_limit(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the process is up.
    pub healthy: bool,
    /// Whether the dataset is loaded and queries can be served.
    pub ready: bool,
    /// Number of loaded records (0 while not ready).
    pub records: usize,
    /// Service version.
    pub version: String,
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Machine-readable error kind (e.g. `dataset_not_loaded`).
    pub error: String,
    /// Human-readable description.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_to_five() {
        let params: LimitParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.limit, 5);
        assert_eq!(LimitParams::default(), params);
    }

    #[test]
    fn health_is_camel_case() {
        let health = ApiHealth {
            healthy: true,
            ready: false,
            records: 0,
            version: "0.1.0".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&health).unwrap(),
            serde_json::json!({
                "healthy": true,
                "ready": false,
                "records": 0,
                "version": "0.1.0"
            })
        );
    }
}
