pub mod api_utils;
pub mod components;
pub mod config;
pub mod filter_sync;
pub mod format;
pub mod icons;
