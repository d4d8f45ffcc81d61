use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::FilterError;

/// Формат дат во всех фильтрах и query-параметрах
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Closed date interval, `start_date <= end_date`.
///
/// Serialized as `{"startDate": "YYYY-MM-DD", "endDate": "YYYY-MM-DD"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "DateRangeFields")]
pub struct DateRange {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, FilterError> {
        if start_date > end_date {
            return Err(FilterError::InvertedRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Parse a pair of `YYYY-MM-DD` strings as they come from `<input type="date">`
    pub fn parse(start: &str, end: &str) -> Result<Self, FilterError> {
        let start_date = parse_date(start)?;
        let end_date = parse_date(end)?;
        Self::new(start_date, end_date)
    }

    /// Quick range: `end = today`, `start = today - days`
    pub fn last_days(today: NaiveDate, days: u32) -> Self {
        Self {
            start_date: today - Duration::days(i64::from(days)),
            end_date: today,
        }
    }

    /// Период по умолчанию, на котором построены демонстрационные данные
    pub fn default_period() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2025, 5, 2).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2025, 5, 31).unwrap_or_default(),
        }
    }

    pub fn start_str(&self) -> String {
        self.start_date.format(DATE_FORMAT).to_string()
    }

    pub fn end_str(&self) -> String {
        self.end_date.format(DATE_FORMAT).to_string()
    }

    /// Number of calendar days covered, both ends included
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::default_period()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DateRangeFields {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl TryFrom<DateRangeFields> for DateRange {
    type Error = FilterError;

    fn try_from(fields: DateRangeFields) -> Result<Self, Self::Error> {
        DateRange::new(fields.start_date, fields.end_date)
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, FilterError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| FilterError::InvalidDate(value.to_string()))
}
