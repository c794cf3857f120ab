use chrono::Utc;
use std::sync::Arc;

use crate::analysis::aggregator::GeoAggregator;
use crate::analysis::classifier::ItemClassifier;
use crate::config::{PipelineConfig, ReportConfig};
use crate::error::Result;
use crate::models::ReportOutcome;
use crate::monday::BoardSource;
use crate::report::ReportExporter;

pub struct ReportPipeline {
    source: Arc<dyn BoardSource>,
    classifier: ItemClassifier,
    aggregator: GeoAggregator,
    exporter: ReportExporter,
    config: PipelineConfig,
}

impl ReportPipeline {
    pub fn new(
        source: impl BoardSource + 'static,
        classifier: ItemClassifier,
        exporter: ReportExporter,
        config: PipelineConfig,
    ) -> Self {
        Self {
            source: Arc::new(source),
            classifier,
            aggregator: GeoAggregator::new(),
            exporter,
            config,
        }
    }

    pub fn from_config(
        source: impl BoardSource + 'static,
        report: &ReportConfig,
        config: PipelineConfig,
        exporter: ReportExporter,
    ) -> Self {
        Self::new(source, ItemClassifier::from_config(report), exporter, config)
    }

    /// Fetches, classifies, aggregates and exports. Nothing is written unless
    /// the fetch succeeded in full.
    pub async fn run(&self) -> Result<ReportOutcome> {
        // Step 1: Pull every item from the board
        tracing::info!("Fetching board {} from {}", self.config.board_id, self.source.name());
        let snapshot = self.source.fetch_board(&self.config).await?;
        let fetched = snapshot.items.len();

        // Step 2: Filter and tag
        let (items, drops) = self.classifier.classify(&snapshot.items);
        tracing::info!(
            "{} of {} items kept ({} dropped)",
            items.len(),
            fetched,
            drops.total()
        );

        if items.is_empty() {
            tracing::warn!("No data after filtering, writing an empty report");
        }

        // Step 3: Roll up per geography
        let summary = self.aggregator.aggregate(&items);

        // Step 4: Write both tables from the same item set
        let paths = self.exporter.export(&items, &summary)?;

        Ok(ReportOutcome {
            board_name: snapshot.board_name,
            fetched,
            items,
            summary,
            paths,
            generated_at: Utc::now(),
        })
    }
}
