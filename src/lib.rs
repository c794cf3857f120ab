pub mod config;
pub mod error;
pub mod models;
pub mod monday;
pub mod taxonomy;
pub mod analysis;
pub mod report;

pub use config::{Config, PipelineConfig, ReportConfig};
pub use error::{Error, ErrorKind, Result};
pub use monday::{BoardSource, MondayClient};
pub use analysis::ReportPipeline;
pub use report::ReportExporter;
