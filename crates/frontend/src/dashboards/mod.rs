pub mod d402_insight_explorer;

pub use d402_insight_explorer::ui::InsightExplorerDashboard;
