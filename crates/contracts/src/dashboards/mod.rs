pub mod d402_insight_explorer;
