//! Weekday names <-> numeric codes.
//!
//! One numbering for the whole system: `0 = Sunday .. 6 = Saturday`, the same
//! scheme as `chrono::Weekday::num_days_from_sunday` and PostgreSQL `DOW`.
//! The insight detector, the weekday select and the query parameters all go
//! through this table.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Locale of weekday names coming from the insight detector or shown in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en")]
    En,
}

/// Week order used for tables and selects: Sunday first
pub const WEEK: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Full names, matched by `name_to_code`
fn full_name(day: Weekday, locale: Locale) -> &'static str {
    match locale {
        Locale::PtBr => match day {
            Weekday::Sun => "domingo",
            Weekday::Mon => "segunda-feira",
            Weekday::Tue => "terça-feira",
            Weekday::Wed => "quarta-feira",
            Weekday::Thu => "quinta-feira",
            Weekday::Fri => "sexta-feira",
            Weekday::Sat => "sábado",
        },
        Locale::En => match day {
            Weekday::Sun => "sunday",
            Weekday::Mon => "monday",
            Weekday::Tue => "tuesday",
            Weekday::Wed => "wednesday",
            Weekday::Thu => "thursday",
            Weekday::Fri => "friday",
            Weekday::Sat => "saturday",
        },
    }
}

/// Short capitalised label for selects and chips
pub fn label(day: Weekday, locale: Locale) -> &'static str {
    match locale {
        Locale::PtBr => match day {
            Weekday::Sun => "Domingo",
            Weekday::Mon => "Segunda",
            Weekday::Tue => "Terça",
            Weekday::Wed => "Quarta",
            Weekday::Thu => "Quinta",
            Weekday::Fri => "Sexta",
            Weekday::Sat => "Sábado",
        },
        Locale::En => match day {
            Weekday::Sun => "Sunday",
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
        },
    }
}

pub fn code(day: Weekday) -> u8 {
    day.num_days_from_sunday() as u8
}

pub fn from_code(code: u8) -> Option<Weekday> {
    WEEK.get(usize::from(code)).copied()
}

/// Exact, case-insensitive lookup. Unknown names mean "no weekday filter".
pub fn name_to_code(name: &str, locale: Locale) -> Option<u8> {
    let needle = name.trim().to_lowercase();
    WEEK.iter()
        .find(|day| full_name(**day, locale) == needle)
        .map(|day| code(*day))
}

pub fn code_to_label(code: u8, locale: Locale) -> Option<&'static str> {
    from_code(code).map(|day| label(day, locale))
}

/// `(code, label)` pairs in code order, for the weekday select
pub fn options(locale: Locale) -> Vec<(u8, &'static str)> {
    WEEK.iter().map(|day| (code(*day), label(*day, locale))).collect()
}
