pub mod dto;
pub mod translate;

pub use dto::*;
pub use translate::translate;
