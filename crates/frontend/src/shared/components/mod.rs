pub mod context_filter_panel;
pub mod date_range_picker;
pub mod filter_panel;
pub mod store_filter;
