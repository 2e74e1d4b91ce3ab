// Library interface for tripdash
// This allows integration tests to access internal modules

pub mod comparison;
pub mod config;
pub mod errors;
pub mod insights;
pub mod loader;
pub mod replay;
pub mod report;
pub mod trip;
pub mod writer;

// Re-export commonly used types
pub use comparison::{ComparisonSummary, MetricComparison, PercentageDiff, compare_trips};
pub use errors::TripDashError;
pub use insights::{InsightSummary, TripAggregate, aggregate, compute_insights, format_duration};
pub use replay::{PlaybackSpeed, ReplayCursor, ReplayFrame, SpeedTrend};
pub use trip::{Location, TelemetryPoint, TripMetadata, TripSession, TyreType};
