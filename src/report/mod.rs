pub mod exporter;
pub mod preview;

pub use exporter::{ReportExporter, RAW_ITEMS_FILE, SUMMARY_FILE};
pub use preview::{format_preview, format_summary_table};
