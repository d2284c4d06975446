#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result row types for the incident analytics engine.
//!
//! Every query returns an ordered list of flat rows. The serde field names
//! here are the wire contract, so they keep the dataset's column spelling
//! (`MonthName`, `TotalDeaths`, ...) rather than a uniform case convention.

use incident_stats_dataset_models::AgeGroup;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// A state present in the dataset with its postal code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateEntry {
    /// Full state name.
    pub name: String,
    /// Two-letter postal code.
    pub code: String,
}

/// A year present in the dataset. `value` repeats `year` for select-box
/// consumers that expect a label/value pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearEntry {
    pub year: i32,
    pub value: i32,
}

/// Death count for one month of a year/state slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyDeaths {
    #[serde(rename = "MonthName")]
    pub month_name: String,
    #[serde(rename = "TotalDeaths")]
    pub total_deaths: u64,
}

/// Death count for one year of a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyDeaths {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "TotalDeaths")]
    pub total_deaths: u64,
}

/// Male/female death counts for one victim age bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeGroupDeaths {
    #[serde(rename = "AgeGroup")]
    pub age_group: AgeGroup,
    #[serde(rename = "Male")]
    pub male: u64,
    #[serde(rename = "Female")]
    pub female: u64,
}

/// Police-involved death count for one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoliceInvolvedDeaths {
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "TotalDeathsInvolvingPolice")]
    pub total_deaths_involving_police: u64,
}

/// Incident (row) count for one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateIncidents {
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "TotalIncidents")]
    pub total_incidents: u64,
}

/// Death count for one death type of a year/state slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathsByType {
    #[serde(rename = "TypeofDeaths")]
    pub type_of_deaths: String,
    #[serde(rename = "TotalDeaths")]
    pub total_deaths: u64,
}

/// Default number of states returned by the top-states query.
pub const DEFAULT_TOP_STATES_LIMIT: i64 = 5;

/// Enumeration of every analytical query the engine answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum QueryKind {
    /// Distinct states with postal codes.
    ListStates,
    /// Distinct years.
    ListYears,
    /// Deaths per month for a year and state.
    MonthlyDeaths,
    /// Deaths per year for a state.
    YearlyDeaths,
    /// Deaths per age bucket and gender for a year and state.
    AgeGroupDeaths,
    /// Police-involved deaths per state for a year.
    PoliceInvolvedByState,
    /// States ranked by incident count.
    TopStatesByIncidents,
    /// Deaths per death type for a year and state.
    DeathsByType,
}

impl QueryKind {
    /// Returns all query kinds.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::ListStates,
            Self::ListYears,
            Self::MonthlyDeaths,
            Self::YearlyDeaths,
            Self::AgeGroupDeaths,
            Self::PoliceInvolvedByState,
            Self::TopStatesByIncidents,
            Self::DeathsByType,
        ]
    }

    /// Key under which the result rows are wrapped in a response body.
    #[must_use]
    pub const fn result_key(self) -> &'static str {
        match self {
            Self::ListStates => "states",
            Self::ListYears => "years",
            Self::MonthlyDeaths => "monthly_deaths",
            Self::YearlyDeaths => "yearly_deaths",
            Self::AgeGroupDeaths => "deaths_by_age_group",
            Self::PoliceInvolvedByState => "deaths_police_involved_statewise",
            Self::TopStatesByIncidents => "top_states_by_incident_count",
            Self::DeathsByType => "type_of_deaths",
        }
    }

    /// HTTP path serving this query.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::ListStates => "/getstates",
            Self::ListYears => "/getyears",
            Self::MonthlyDeaths => "/deaths/monthly",
            Self::YearlyDeaths => "/deaths/yearly",
            Self::AgeGroupDeaths => "/deaths/age-group",
            Self::PoliceInvolvedByState => "/deaths/police-involved",
            Self::TopStatesByIncidents => "/deaths/top-states",
            Self::DeathsByType => "/deaths/type-of-deaths",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_field_names() {
        let row = MonthlyDeaths {
            month_name: "March".to_string(),
            total_deaths: 4,
        };
        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            serde_json::json!({ "MonthName": "March", "TotalDeaths": 4 })
        );

        let row = AgeGroupDeaths {
            age_group: AgeGroup::EighteenToThirtyFour,
            male: 2,
            female: 0,
        };
        assert_eq!(
            serde_json::to_value(row).unwrap(),
            serde_json::json!({ "AgeGroup": "19-35", "Male": 2, "Female": 0 })
        );
    }

    #[test]
    fn result_keys_are_unique() {
        let mut keys: Vec<&str> = QueryKind::all().iter().map(|k| k.result_key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), QueryKind::all().len());
    }

    #[test]
    fn kind_names() {
        assert_eq!(
            QueryKind::TopStatesByIncidents.to_string(),
            "top_states_by_incidents"
        );
        assert_eq!(QueryKind::DeathsByType.to_string(), "deaths_by_type");
    }
}
