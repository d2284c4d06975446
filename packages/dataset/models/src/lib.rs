#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident record types for the gun violence dataset.
//!
//! An [`IncidentRecord`] is one validated row of the source CSV. Records are
//! built once at load time and never mutated afterwards, so every field is
//! strongly typed and the derived month name is resolved up front.

use incident_stats_catalog::Month;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Source column holding the incident year.
pub const COLUMN_YEAR: &str = "Year";
/// Source column holding the incident month number.
pub const COLUMN_MONTH: &str = "Month";
/// Source column holding the full state name.
pub const COLUMN_STATE: &str = "State";
/// Source column holding the victim age.
pub const COLUMN_VICTIM_AGE: &str = "Victim Age";
/// Source column holding the victim gender.
pub const COLUMN_VICTIM_GENDER: &str = "Victim Gender";
/// Source column holding the `"Yes"`/`"No"` police involvement flag.
pub const COLUMN_POLICE_INVOLVED: &str = "Police Involved";
/// Source column holding the death type category.
pub const COLUMN_TYPE_OF_DEATHS: &str = "TypeofDeaths";

/// Every column the source CSV must carry for a load to succeed.
pub const REQUIRED_COLUMNS: &[&str] = &[
    COLUMN_YEAR,
    COLUMN_MONTH,
    COLUMN_STATE,
    COLUMN_VICTIM_AGE,
    COLUMN_VICTIM_GENDER,
    COLUMN_POLICE_INVOLVED,
    COLUMN_TYPE_OF_DEATHS,
];

/// One incident row of the loaded dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentRecord {
    /// Year the incident occurred.
    pub year: i32,
    /// Month the incident occurred.
    pub month: Month,
    /// English month name, derived from `month` at load time.
    pub month_name: &'static str,
    /// Full state name (e.g. "Texas").
    pub state: String,
    /// Victim age in years, `None` when missing or unparseable.
    pub victim_age: Option<f64>,
    /// Victim gender as recorded (expected "Male" or "Female").
    pub victim_gender: String,
    /// Police involvement flag as recorded ("Yes" or "No").
    pub police_involved: String,
    /// Death type category.
    pub type_of_deaths: String,
}

impl IncidentRecord {
    /// Value of the police involvement column that marks involvement.
    pub const POLICE_INVOLVED_YES: &'static str = "Yes";

    /// Whether police were involved in this incident.
    #[must_use]
    pub fn is_police_involved(&self) -> bool {
        self.police_involved == Self::POLICE_INVOLVED_YES
    }

    /// Age bucket of the victim, if the age falls inside one.
    #[must_use]
    pub fn age_group(&self) -> Option<AgeGroup> {
        self.victim_age.and_then(AgeGroup::from_age)
    }
}

/// Victim age bucket.
///
/// Buckets are half-open on the upper side: `[0, 18)`, `[18, 35)`,
/// `[35, 50)`, `[50, 65)`, `[65, 80)`, `[80, 100)`. The labels keep the
/// historical naming, so an age of exactly 18 lands in `"19-35"`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum AgeGroup {
    #[serde(rename = "0-18")]
    #[strum(serialize = "0-18")]
    UnderEighteen,
    #[serde(rename = "19-35")]
    #[strum(serialize = "19-35")]
    EighteenToThirtyFour,
    #[serde(rename = "36-50")]
    #[strum(serialize = "36-50")]
    ThirtyFiveToFortyNine,
    #[serde(rename = "51-65")]
    #[strum(serialize = "51-65")]
    FiftyToSixtyFour,
    #[serde(rename = "66-80")]
    #[strum(serialize = "66-80")]
    SixtyFiveToSeventyNine,
    #[serde(rename = "81-100")]
    #[strum(serialize = "81-100")]
    EightyToNinetyNine,
}

impl AgeGroup {
    /// Returns all buckets in ascending age order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::UnderEighteen,
            Self::EighteenToThirtyFour,
            Self::ThirtyFiveToFortyNine,
            Self::FiftyToSixtyFour,
            Self::SixtyFiveToSeventyNine,
            Self::EightyToNinetyNine,
        ]
    }

    /// Inclusive lower and exclusive upper bound of the bucket.
    #[must_use]
    pub const fn bounds(self) -> (f64, f64) {
        match self {
            Self::UnderEighteen => (0.0, 18.0),
            Self::EighteenToThirtyFour => (18.0, 35.0),
            Self::ThirtyFiveToFortyNine => (35.0, 50.0),
            Self::FiftyToSixtyFour => (50.0, 65.0),
            Self::SixtyFiveToSeventyNine => (65.0, 80.0),
            Self::EightyToNinetyNine => (80.0, 100.0),
        }
    }

    /// Classifies an age. Ages below 0, at or above 100, or NaN map to
    /// no bucket.
    #[must_use]
    pub fn from_age(age: f64) -> Option<Self> {
        Self::all().iter().copied().find(|group| {
            let (low, high) = group.bounds();
            age >= low && age < high
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(age: Option<f64>, police: &str) -> IncidentRecord {
        IncidentRecord {
            year: 2020,
            month: Month::March,
            month_name: Month::March.name(),
            state: "Texas".to_string(),
            victim_age: age,
            victim_gender: "Male".to_string(),
            police_involved: police.to_string(),
            type_of_deaths: "Homicide".to_string(),
        }
    }

    #[test]
    fn bucket_upper_bounds_are_exclusive() {
        assert_eq!(AgeGroup::from_age(17.9), Some(AgeGroup::UnderEighteen));
        assert_eq!(AgeGroup::from_age(18.0), Some(AgeGroup::EighteenToThirtyFour));
        assert_eq!(AgeGroup::from_age(35.0), Some(AgeGroup::ThirtyFiveToFortyNine));
        assert_eq!(AgeGroup::from_age(99.5), Some(AgeGroup::EightyToNinetyNine));
        assert_eq!(AgeGroup::from_age(100.0), None);
    }

    #[test]
    fn out_of_range_ages_have_no_bucket() {
        assert_eq!(AgeGroup::from_age(-1.0), None);
        assert_eq!(AgeGroup::from_age(f64::NAN), None);
        assert_eq!(AgeGroup::from_age(0.0), Some(AgeGroup::UnderEighteen));
    }

    #[test]
    fn labels() {
        let labels: Vec<String> = AgeGroup::all().iter().map(ToString::to_string).collect();
        assert_eq!(
            labels,
            vec!["0-18", "19-35", "36-50", "51-65", "66-80", "81-100"]
        );
        assert_eq!("66-80".parse::<AgeGroup>(), Ok(AgeGroup::SixtyFiveToSeventyNine));
    }

    #[test]
    fn record_helpers() {
        assert!(record(Some(18.0), "Yes").is_police_involved());
        assert!(!record(Some(18.0), "No").is_police_involved());
        assert_eq!(
            record(Some(18.0), "No").age_group(),
            Some(AgeGroup::EighteenToThirtyFour)
        );
        assert_eq!(record(None, "No").age_group(), None);
    }
}
