//! CSV parsing into typed incident records.

use incident_stats_catalog::Month;
use incident_stats_dataset_models::{
    COLUMN_MONTH, COLUMN_POLICE_INVOLVED, COLUMN_STATE, COLUMN_TYPE_OF_DEATHS, COLUMN_VICTIM_AGE,
    COLUMN_VICTIM_GENDER, COLUMN_YEAR, IncidentRecord, REQUIRED_COLUMNS,
};

use crate::DatasetError;

/// Positions of the required columns within the header row.
struct ColumnIndex {
    year: usize,
    month: usize,
    state: usize,
    victim_age: usize,
    victim_gender: usize,
    police_involved: usize,
    type_of_deaths: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, DatasetError> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|name| position(*name).is_none())
            .map(str::to_string)
            .collect();

        match (
            position(COLUMN_YEAR),
            position(COLUMN_MONTH),
            position(COLUMN_STATE),
            position(COLUMN_VICTIM_AGE),
            position(COLUMN_VICTIM_GENDER),
            position(COLUMN_POLICE_INVOLVED),
            position(COLUMN_TYPE_OF_DEATHS),
        ) {
            (
                Some(year),
                Some(month),
                Some(state),
                Some(victim_age),
                Some(victim_gender),
                Some(police_involved),
                Some(type_of_deaths),
            ) => Ok(Self {
                year,
                month,
                state,
                victim_age,
                victim_gender,
                police_involved,
                type_of_deaths,
            }),
            _ => Err(DatasetError::MissingColumns { columns: missing }),
        }
    }
}

/// Parses every data row of `bytes` into an [`IncidentRecord`].
pub(crate) fn parse_records(bytes: &[u8]) -> Result<Vec<IncidentRecord>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let columns = ColumnIndex::from_headers(reader.headers()?)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let line = row.position().map_or(0, csv::Position::line);
        let field = |i: usize| row.get(i).unwrap_or("");

        let year = parse_whole_number(field(columns.year)).ok_or_else(|| {
            DatasetError::InvalidRow {
                line,
                message: format!("'{}' is not a valid Year", field(columns.year)),
            }
        })?;
        let year = i32::try_from(year).map_err(|_| DatasetError::InvalidRow {
            line,
            message: format!("Year {year} is out of range"),
        })?;

        let month_number = parse_whole_number(field(columns.month)).ok_or_else(|| {
            DatasetError::InvalidRow {
                line,
                message: format!("'{}' is not a valid Month", field(columns.month)),
            }
        })?;
        let month = Month::from_number(month_number)
            .map_err(|source| DatasetError::UnknownMonth { line, source })?;

        records.push(IncidentRecord {
            year,
            month,
            month_name: month.name(),
            state: field(columns.state).to_string(),
            victim_age: parse_age(field(columns.victim_age)),
            victim_gender: field(columns.victim_gender).to_string(),
            police_involved: field(columns.police_involved).to_string(),
            type_of_deaths: field(columns.type_of_deaths).to_string(),
        });
    }

    log::debug!("Parsed {} incident records", records.len());

    Ok(records)
}

/// Parses an integer column, accepting a float rendering with no
/// fractional part (`"2020.0"`).
#[allow(clippy::cast_possible_truncation)]
fn parse_whole_number(s: &str) -> Option<i64> {
    if let Ok(value) = s.parse::<i64>() {
        return Some(value);
    }
    let value = s.parse::<f64>().ok()?;
    (value.is_finite() && value.fract() == 0.0).then_some(value as i64)
}

/// Parses a victim age. Missing or non-numeric values yield `None`.
fn parse_age(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|age| age.is_finite())
}
