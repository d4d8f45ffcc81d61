use chrono::NaiveDate;
use thiserror::Error;

/// Ошибки построения фильтров
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Start date {start} is after end date {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    #[error("Weekday code out of range: {0}")]
    WeekdayOutOfRange(u8),

    #[error("Hour out of range: {0}")]
    HourOutOfRange(u8),
}
