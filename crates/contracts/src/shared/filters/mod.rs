pub mod catalog;
pub mod context;
pub mod date_range;
pub mod error;
pub mod normalize;
pub mod query;
pub mod weekday;

pub use context::*;
pub use date_range::*;
pub use error::FilterError;
pub use normalize::normalize;
pub use query::AnalyticsQuery;
pub use weekday::Locale;
