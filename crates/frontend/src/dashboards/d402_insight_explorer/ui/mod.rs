pub mod dashboard;
pub mod insights_panel;
pub mod products_table;

pub use dashboard::InsightExplorerDashboard;
