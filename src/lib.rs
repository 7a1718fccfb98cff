//! Position list filtering, rule-based position analysis and price chart
//! windowing for the Trade Insight portfolio viewer.

pub mod analysis;
pub mod config;
pub mod display;
pub mod position;
pub mod price_history;
pub mod query;
pub mod repository;

pub use analysis::{
    ActionCategory, PositionAnalysis, PositionAnalyzer, RecommendedAction, RiskRating, RiskSeverity,
};
pub use config::{AnalysisConfig, InsightConfig};
pub use position::Position;
pub use price_history::{PricePoint, PriceSeriesFilter, PriceSeriesView, TimeRange};
pub use query::{PositionQuery, PositionQueryEngine, SortOrder};
pub use repository::{PositionRepository, PositionSource};
