//! Query execution functions.
//!
//! Each function implements one analytical query. They filter the shared
//! records, accumulate counts per grouping key in a single pass, and return
//! typed rows. Nothing here mutates the dataset or caches results, so every
//! function can run concurrently and repeated calls return identical rows.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use incident_stats_analytics_models::{
    AgeGroupDeaths, DeathsByType, MonthlyDeaths, PoliceInvolvedDeaths, StateEntry,
    StateIncidents, YearEntry, YearlyDeaths,
};
use incident_stats_catalog::{Month, state_code};
use incident_stats_dataset::{Dataset, DatasetStore, IncidentRecord};
use incident_stats_dataset_models::AgeGroup;

use crate::AnalyticsError;

/// Gender value counted in the `Male` column of the age breakdown.
const GENDER_MALE: &str = "Male";
/// Gender value counted in the `Female` column of the age breakdown.
const GENDER_FEMALE: &str = "Female";

fn dataset(store: &DatasetStore) -> Result<&Dataset, AnalyticsError> {
    store.get().ok_or(AnalyticsError::DatasetNotLoaded)
}

/// Validates a state parameter, returning it trimmed.
fn require_state(state: &str) -> Result<&str, AnalyticsError> {
    let trimmed = state.trim();
    if trimmed.is_empty() {
        return Err(AnalyticsError::InvalidParameter {
            name: "state".to_string(),
            message: "must not be empty".to_string(),
        });
    }
    Ok(trimmed)
}

fn in_year_and_state<'a>(
    dataset: &'a Dataset,
    year: i32,
    state: &'a str,
) -> impl Iterator<Item = &'a IncidentRecord> {
    dataset
        .records()
        .iter()
        .filter(move |r| r.year == year && r.state == state)
}

/// Counts rows per key, remembering the order in which keys were first seen.
#[derive(Debug, Default)]
struct FirstSeenCounter<'a> {
    index: HashMap<&'a str, usize>,
    counts: Vec<(&'a str, u64)>,
}

impl<'a> FirstSeenCounter<'a> {
    fn add(&mut self, key: &'a str) {
        if let Some(&i) = self.index.get(key) {
            self.counts[i].1 += 1;
        } else {
            self.index.insert(key, self.counts.len());
            self.counts.push((key, 1));
        }
    }

    fn into_counts(self) -> Vec<(&'a str, u64)> {
        self.counts
    }
}

/// Lists the distinct states in the dataset, ascending, with postal codes.
///
/// # Errors
///
/// * [`AnalyticsError::DatasetNotLoaded`] if the store is not ready.
/// * [`AnalyticsError::UnknownState`] if any state has no catalog entry.
pub fn list_states(store: &DatasetStore) -> Result<Vec<StateEntry>, AnalyticsError> {
    let dataset = dataset(store)?;

    let names: BTreeSet<&str> = dataset.records().iter().map(|r| r.state.as_str()).collect();

    names
        .into_iter()
        .map(|name| -> Result<StateEntry, AnalyticsError> {
            let code = state_code(name).inspect_err(|e| {
                log::warn!("State catalog mismatch: {e}");
            })?;
            Ok(StateEntry {
                name: name.to_string(),
                code: code.to_string(),
            })
        })
        .collect()
}

/// Lists the distinct years in the dataset, ascending.
///
/// # Errors
///
/// Returns [`AnalyticsError::DatasetNotLoaded`] if the store is not ready.
pub fn list_years(store: &DatasetStore) -> Result<Vec<YearEntry>, AnalyticsError> {
    let dataset = dataset(store)?;

    let years: BTreeSet<i32> = dataset.records().iter().map(|r| r.year).collect();

    Ok(years
        .into_iter()
        .map(|year| YearEntry { year, value: year })
        .collect())
}

/// Counts deaths per month for one year and state.
///
/// Months with no matching rows are omitted. Rows are in calendar order.
///
/// # Errors
///
/// * [`AnalyticsError::DatasetNotLoaded`] if the store is not ready.
/// * [`AnalyticsError::InvalidParameter`] if `state` is blank.
pub fn monthly_deaths(
    store: &DatasetStore,
    year: i32,
    state: &str,
) -> Result<Vec<MonthlyDeaths>, AnalyticsError> {
    let dataset = dataset(store)?;
    let state = require_state(state)?;

    let mut counts: BTreeMap<Month, (&'static str, u64)> = BTreeMap::new();
    for record in in_year_and_state(dataset, year, state) {
        counts.entry(record.month).or_insert((record.month_name, 0)).1 += 1;
    }

    Ok(counts
        .into_values()
        .map(|(month_name, total_deaths)| MonthlyDeaths {
            month_name: month_name.to_string(),
            total_deaths,
        })
        .collect())
}

/// Counts deaths per year for one state, most recent year first.
///
/// # Errors
///
/// * [`AnalyticsError::DatasetNotLoaded`] if the store is not ready.
/// * [`AnalyticsError::InvalidParameter`] if `state` is blank.
pub fn yearly_deaths(
    store: &DatasetStore,
    state: &str,
) -> Result<Vec<YearlyDeaths>, AnalyticsError> {
    let dataset = dataset(store)?;
    let state = require_state(state)?;

    let mut counts: BTreeMap<i32, u64> = BTreeMap::new();
    for record in dataset.records().iter().filter(|r| r.state == state) {
        *counts.entry(record.year).or_insert(0) += 1;
    }

    Ok(counts
        .into_iter()
        .rev()
        .map(|(year, total_deaths)| YearlyDeaths { year, total_deaths })
        .collect())
}

/// Cross-tabulates victim age bucket against gender for one year and state.
///
/// Only rows matching both `year` and `state` are counted. A bucket is
/// emitted when at least one matching row with a recorded gender falls in
/// it; genders other than `Male` and `Female` make the bucket appear but
/// are not reported as columns. Rows with no age, or an age outside
/// `[0, 100)`, are skipped. Buckets are in ascending age order.
///
/// # Errors
///
/// * [`AnalyticsError::DatasetNotLoaded`] if the store is not ready.
/// * [`AnalyticsError::InvalidParameter`] if `state` is blank.
pub fn age_group_deaths(
    store: &DatasetStore,
    year: i32,
    state: &str,
) -> Result<Vec<AgeGroupDeaths>, AnalyticsError> {
    let dataset = dataset(store)?;
    let state = require_state(state)?;

    let mut counts: BTreeMap<AgeGroup, (u64, u64)> = BTreeMap::new();
    for record in in_year_and_state(dataset, year, state) {
        let Some(group) = record.age_group() else {
            continue;
        };
        if record.victim_gender.is_empty() {
            continue;
        }

        let (male, female) = counts.entry(group).or_insert((0, 0));
        match record.victim_gender.as_str() {
            GENDER_MALE => *male += 1,
            GENDER_FEMALE => *female += 1,
            _ => {}
        }
    }

    Ok(counts
        .into_iter()
        .map(|(age_group, (male, female))| AgeGroupDeaths {
            age_group,
            male,
            female,
        })
        .collect())
}

/// Counts police-involved deaths per state for one year, ascending by state.
///
/// States with no police-involved rows that year are omitted.
///
/// # Errors
///
/// Returns [`AnalyticsError::DatasetNotLoaded`] if the store is not ready.
pub fn police_involved_by_state(
    store: &DatasetStore,
    year: i32,
) -> Result<Vec<PoliceInvolvedDeaths>, AnalyticsError> {
    let dataset = dataset(store)?;

    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for record in dataset
        .records()
        .iter()
        .filter(|r| r.year == year && r.is_police_involved())
    {
        *counts.entry(record.state.as_str()).or_insert(0) += 1;
    }

    Ok(counts
        .into_iter()
        .map(|(state, total)| PoliceInvolvedDeaths {
            state: state.to_string(),
            total_deaths_involving_police: total,
        })
        .collect())
}

/// Ranks states by incident count (one incident per row), highest first.
///
/// Ties keep the order in which the states first appear in the dataset.
/// A `limit` of zero or less yields no rows; a limit beyond the number of
/// states yields every state.
///
/// # Errors
///
/// Returns [`AnalyticsError::DatasetNotLoaded`] if the store is not ready.
pub fn top_states_by_incidents(
    store: &DatasetStore,
    limit: i64,
) -> Result<Vec<StateIncidents>, AnalyticsError> {
    let dataset = dataset(store)?;

    let Ok(limit) = usize::try_from(limit) else {
        return Ok(Vec::new());
    };

    let mut counter = FirstSeenCounter::default();
    for record in dataset.records() {
        counter.add(&record.state);
    }

    let mut counts = counter.into_counts();
    // `sort_by` is stable, so equal counts stay in first-seen order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);

    Ok(counts
        .into_iter()
        .map(|(state, total_incidents)| StateIncidents {
            state: state.to_string(),
            total_incidents,
        })
        .collect())
}

/// Counts deaths per death type for one year and state, ascending by type.
///
/// # Errors
///
/// * [`AnalyticsError::DatasetNotLoaded`] if the store is not ready.
/// * [`AnalyticsError::InvalidParameter`] if `state` is blank.
pub fn deaths_by_type(
    store: &DatasetStore,
    year: i32,
    state: &str,
) -> Result<Vec<DeathsByType>, AnalyticsError> {
    let dataset = dataset(store)?;
    let state = require_state(state)?;

    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for record in in_year_and_state(dataset, year, state) {
        *counts.entry(record.type_of_deaths.as_str()).or_insert(0) += 1;
    }

    Ok(counts
        .into_iter()
        .map(|(type_of_deaths, total_deaths)| DeathsByType {
            type_of_deaths: type_of_deaths.to_string(),
            total_deaths,
        })
        .collect())
}
