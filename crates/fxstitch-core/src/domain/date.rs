use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::ValidationError;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Calendar date in the upstream wire format `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate(Date);

impl IsoDate {
    /// Current calendar date in UTC.
    pub fn today_utc() -> Self {
        Self(OffsetDateTime::now_utc().date())
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Date::parse(input, DATE_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: input.to_owned(),
            })
    }

    pub const fn from_date(date: Date) -> Self {
        Self(date)
    }

    pub const fn into_inner(self) -> Date {
        self.0
    }

    /// Same calendar day `years` years earlier. A Feb 29 anchor lands on
    /// Feb 28 when the target year is not a leap year.
    pub fn years_back(self, years: i32) -> Self {
        let year = self.0.year() - years;
        let date = Date::from_calendar_date(year, self.0.month(), self.0.day())
            .or_else(|_| Date::from_calendar_date(year, self.0.month(), 28))
            .expect("day 28 exists in every month");
        Self(date)
    }

    /// Signed day count from `self` to `other`.
    pub fn days_until(self, other: Self) -> i64 {
        (other.0 - self.0).whole_days()
    }

    pub fn format_iso(self) -> String {
        self.0
            .format(DATE_FORMAT)
            .expect("IsoDate must be formattable")
    }
}

impl Display for IsoDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_iso())
    }
}

impl FromStr for IsoDate {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl Serialize for IsoDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_iso())
    }
}

impl<'de> Deserialize<'de> for IsoDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_date() {
        let date = IsoDate::parse("2022-03-01").expect("must parse");
        assert_eq!(date.format_iso(), "2022-03-01");
    }

    #[test]
    fn rejects_malformed_date() {
        let err = IsoDate::parse("01/03/2022").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidDate { .. }));
    }

    #[test]
    fn years_back_keeps_calendar_day() {
        let date = IsoDate::parse("2022-03-01").expect("must parse");
        assert_eq!(date.years_back(3).format_iso(), "2019-03-01");
    }

    #[test]
    fn years_back_clamps_leap_day() {
        let date = IsoDate::parse("2024-02-29").expect("must parse");
        assert_eq!(date.years_back(1).format_iso(), "2023-02-28");
    }

    #[test]
    fn counts_days_between_dates() {
        let start = IsoDate::parse("2021-03-01").expect("must parse");
        let end = IsoDate::parse("2022-03-01").expect("must parse");
        assert_eq!(start.days_until(end), 365);
    }
}
