use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, Weekday};

use crate::ValidationError;

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Wall-clock "HH:MM" time used by the market schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Result<Self, ValidationError> {
        if hour >= 24 || minute >= 60 {
            return Err(ValidationError::InvalidTimeOfDay {
                value: format!("{hour:02}:{minute:02}"),
            });
        }
        Ok(Self { hour, minute })
    }

    pub const fn hour(self) -> u8 {
        self.hour
    }

    pub const fn minute(self) -> u8 {
        self.minute
    }

    fn from_clock(at: OffsetDateTime) -> Self {
        Self {
            hour: at.hour(),
            minute: at.minute(),
        }
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidTimeOfDay {
            value: value.to_owned(),
        };

        let (hour, minute) = value.trim().split_once(':').ok_or_else(invalid)?;
        let hour = hour.parse::<u8>().map_err(|_| invalid())?;
        let minute = minute.parse::<u8>().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// A non-trading calendar date, stored as "YYYY-MM-DD".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HolidayDate(Date);

impl HolidayDate {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        parse_iso_date(input).map(Self)
    }

    pub const fn date(self) -> Date {
        self.0
    }
}

impl From<Date> for HolidayDate {
    fn from(value: Date) -> Self {
        Self(value)
    }
}

impl Display for HolidayDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_iso_date(self.0))
    }
}

impl TryFrom<String> for HolidayDate {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HolidayDate> for String {
    fn from(value: HolidayDate) -> Self {
        value.to_string()
    }
}

/// Parse a "YYYY-MM-DD" date string.
pub fn parse_iso_date(input: &str) -> Result<Date, ValidationError> {
    Date::parse(input.trim(), ISO_DATE).map_err(|_| ValidationError::InvalidIsoDate {
        value: input.to_owned(),
    })
}

/// Format a date as the "YYYY-MM-DD" string used in storage and URLs.
pub fn format_iso_date(date: Date) -> String {
    date.format(ISO_DATE)
        .expect("ISO date must be formattable")
}

/// Configured trading hours plus non-trading dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketHours {
    pub open: TimeOfDay,
    pub close: TimeOfDay,
    pub holidays: Vec<HolidayDate>,
}

impl Default for MarketHours {
    fn default() -> Self {
        Self {
            open: TimeOfDay { hour: 9, minute: 30 },
            close: TimeOfDay { hour: 16, minute: 0 },
            holidays: Vec::new(),
        }
    }
}

impl MarketHours {
    pub fn new(
        open: TimeOfDay,
        close: TimeOfDay,
        holidays: Vec<HolidayDate>,
    ) -> Result<Self, ValidationError> {
        if open >= close {
            return Err(ValidationError::OpenNotBeforeClose {
                open: open.to_string(),
                close: close.to_string(),
            });
        }
        Ok(Self {
            open,
            close,
            holidays,
        })
    }

    /// Whether the market is open at the given instant.
    ///
    /// Weekends and configured holidays are closed; otherwise the instant's
    /// hour/minute is compared against [open, close], inclusive on both ends.
    /// The comparison uses whatever offset `at` carries and ignores DST
    /// discontinuities.
    pub fn is_open_at(&self, at: OffsetDateTime) -> bool {
        if matches!(at.weekday(), Weekday::Saturday | Weekday::Sunday) {
            return false;
        }

        if self.holidays.iter().any(|holiday| holiday.date() == at.date()) {
            return false;
        }

        let now = TimeOfDay::from_clock(at);
        self.open <= now && now <= self.close
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn parses_time_of_day() {
        let parsed: TimeOfDay = "9:30".parse().expect("must parse");
        assert_eq!((parsed.hour(), parsed.minute()), (9, 30));
        assert_eq!(parsed.to_string(), "09:30");
    }

    #[test]
    fn rejects_out_of_range_time() {
        let err = "24:00".parse::<TimeOfDay>().expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidTimeOfDay { .. }));
    }

    #[test]
    fn parses_holiday_date() {
        let parsed = HolidayDate::parse("2024-07-04").expect("must parse");
        assert_eq!(parsed.to_string(), "2024-07-04");
    }

    #[test]
    fn rejects_malformed_holiday() {
        let err = HolidayDate::parse("07/04/2024").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidIsoDate { .. }));
    }

    #[test]
    fn default_hours_match_us_session() {
        let hours = MarketHours::default();
        assert_eq!(hours.open.to_string(), "09:30");
        assert_eq!(hours.close.to_string(), "16:00");
        assert!(hours.holidays.is_empty());
    }

    #[test]
    fn rejects_inverted_hours() {
        let open = TimeOfDay::new(16, 0).expect("valid");
        let close = TimeOfDay::new(9, 30).expect("valid");
        let err = MarketHours::new(open, close, Vec::new()).expect_err("must fail");
        assert!(matches!(err, ValidationError::OpenNotBeforeClose { .. }));
    }

    #[test]
    fn closed_on_weekends_at_any_time() {
        let hours = MarketHours::default();
        // 2024-03-02 is a Saturday, 2024-03-03 a Sunday.
        assert!(!hours.is_open_at(datetime!(2024-03-02 12:00:00 UTC)));
        assert!(!hours.is_open_at(datetime!(2024-03-03 12:00:00 UTC)));
    }

    #[test]
    fn closed_on_holiday_open_on_plain_weekday() {
        let holidays = vec![HolidayDate::parse("2024-03-04").expect("valid date")];
        let hours = MarketHours::new(
            TimeOfDay::new(9, 30).expect("valid"),
            TimeOfDay::new(16, 0).expect("valid"),
            holidays,
        )
        .expect("valid hours");

        // 2024-03-04 and 2024-03-05 are Monday and Tuesday.
        assert!(!hours.is_open_at(datetime!(2024-03-04 12:00:00 UTC)));
        assert!(hours.is_open_at(datetime!(2024-03-05 12:00:00 UTC)));
    }

    #[test]
    fn session_bounds_are_inclusive() {
        let hours = MarketHours::default();
        assert!(hours.is_open_at(datetime!(2024-03-05 09:30:00 UTC)));
        assert!(hours.is_open_at(datetime!(2024-03-05 16:00:00 UTC)));
        assert!(!hours.is_open_at(datetime!(2024-03-05 09:29:00 UTC)));
        assert!(!hours.is_open_at(datetime!(2024-03-05 16:01:00 UTC)));
    }
}
