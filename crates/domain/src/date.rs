use std::fmt::{Display, Formatter};

use chrono::NaiveDate;

use crate::DateError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Curiosity landing day; nothing earlier can be on the photo API.
pub const MIN_EARTH_DATE: (i32, u32, u32) = (2012, 8, 6);

pub fn min_earth_date() -> NaiveDate {
    let (year, month, day) = MIN_EARTH_DATE;
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// An earth date that was inside `[MIN_EARTH_DATE, today]` when it was validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn validate(text: &str, today: NaiveDate) -> Result<Self, DateError> {
        let date = NaiveDate::parse_from_str(text, DATE_FORMAT)
            .map_err(|_| DateError::Format(text.to_string()))?;

        let min = min_earth_date();
        if date < min {
            return Err(DateError::TooEarly {
                date: date.format(DATE_FORMAT).to_string(),
                min: min.format(DATE_FORMAT).to_string(),
            });
        }
        if date > today {
            return Err(DateError::Future {
                date: date.format(DATE_FORMAT).to_string(),
                today: today.format(DATE_FORMAT).to_string(),
            });
        }

        Ok(Self(date))
    }

    pub fn get(self) -> NaiveDate {
        self.0
    }
}

impl Display for CalendarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).expect("date")
    }

    #[test]
    fn landing_day_is_the_first_valid_date() {
        assert!(CalendarDate::validate("2012-08-06", today()).is_ok());
        assert!(matches!(
            CalendarDate::validate("2012-08-05", today()),
            Err(DateError::TooEarly { .. })
        ));
    }

    #[test]
    fn today_is_accepted_and_tomorrow_is_rejected() {
        assert!(CalendarDate::validate("2024-06-01", today()).is_ok());
        assert!(matches!(
            CalendarDate::validate("2024-06-02", today()),
            Err(DateError::Future { .. })
        ));
    }

    #[test]
    fn malformed_input_is_a_format_error() {
        for text in ["2024-13-01", "not-a-date", "", "2015/06/03", "2015-06-03 "] {
            assert!(
                matches!(CalendarDate::validate(text, today()), Err(DateError::Format(_))),
                "{text:?} should be a format error"
            );
        }
    }

    #[test]
    fn display_uses_iso_format() {
        let date = CalendarDate::validate("2015-06-03", today()).expect("valid");
        assert_eq!(date.to_string(), "2015-06-03");
    }

    #[test]
    fn error_messages_name_the_violated_bound() {
        let error = CalendarDate::validate("2010-01-01", today()).expect_err("too early");
        assert_eq!(
            error.to_string(),
            "The date must not be earlier than 2012-08-06."
        );
    }
}
