//! Calendar month catalog.

use strum_macros::{AsRefStr, Display};

use crate::CatalogError;

/// A calendar month. The discriminant is the month number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, AsRefStr)]
pub enum Month {
    January = 1,
    February = 2,
    March = 3,
    April = 4,
    May = 5,
    June = 6,
    July = 7,
    August = 8,
    September = 9,
    October = 10,
    November = 11,
    December = 12,
}

impl Month {
    /// Returns all months in calendar order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::January,
            Self::February,
            Self::March,
            Self::April,
            Self::May,
            Self::June,
            Self::July,
            Self::August,
            Self::September,
            Self::October,
            Self::November,
            Self::December,
        ]
    }

    /// Returns the month number (1-12).
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Creates a month from its number.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownMonth`] if `number` is outside `1..=12`.
    pub const fn from_number(number: i64) -> Result<Self, CatalogError> {
        match number {
            1 => Ok(Self::January),
            2 => Ok(Self::February),
            3 => Ok(Self::March),
            4 => Ok(Self::April),
            5 => Ok(Self::May),
            6 => Ok(Self::June),
            7 => Ok(Self::July),
            8 => Ok(Self::August),
            9 => Ok(Self::September),
            10 => Ok(Self::October),
            11 => Ok(Self::November),
            12 => Ok(Self::December),
            _ => Err(CatalogError::UnknownMonth(number)),
        }
    }

    /// Returns the English month name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
            Self::April => "April",
            Self::May => "May",
            Self::June => "June",
            Self::July => "July",
            Self::August => "August",
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
        }
    }
}

/// Maps a month number to its English name.
///
/// # Errors
///
/// Returns [`CatalogError::UnknownMonth`] if `number` is outside `1..=12`.
pub fn month_name(number: i64) -> Result<&'static str, CatalogError> {
    Month::from_number(number).map(Month::name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_months_in_order() {
        let numbers: Vec<u8> = Month::all().iter().map(|m| m.number()).collect();
        assert_eq!(numbers, (1..=12).collect::<Vec<u8>>());
    }

    #[test]
    fn number_roundtrip() {
        for month in Month::all() {
            assert_eq!(Month::from_number(i64::from(month.number())), Ok(*month));
        }
    }

    #[test]
    fn display_matches_name() {
        for month in Month::all() {
            assert_eq!(month.to_string(), month.name());
            assert_eq!(month.as_ref(), month.name());
        }
    }

    #[test]
    fn month_name_lookup() {
        assert_eq!(month_name(3), Ok("March"));
        assert_eq!(month_name(12), Ok("December"));
    }

    #[test]
    fn out_of_range_months_fail() {
        assert_eq!(month_name(0), Err(CatalogError::UnknownMonth(0)));
        assert_eq!(month_name(13), Err(CatalogError::UnknownMonth(13)));
        assert_eq!(month_name(-1), Err(CatalogError::UnknownMonth(-1)));
    }
}
