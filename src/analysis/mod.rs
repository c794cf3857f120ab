pub mod aggregator;
pub mod classifier;
pub mod pipeline;

pub use aggregator::GeoAggregator;
pub use classifier::{DropCounts, ItemClassifier};
pub use pipeline::ReportPipeline;
