use async_trait::async_trait;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::BoardSnapshot;

/// Where the pipeline gets its board items from.
#[async_trait]
pub trait BoardSource: Send + Sync {
    async fn fetch_board(&self, config: &PipelineConfig) -> Result<BoardSnapshot>;
    fn name(&self) -> &str;
}
