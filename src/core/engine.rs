use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Drives one extract → transform → load pass over a broker batch.
pub struct NormalizerEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> NormalizerEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("🚢 Starting listing normalization");

        tracing::info!("📥 Extracting vessel payloads...");
        let raw_records = self.pipeline.extract().await?;
        tracing::info!("📥 Extracted {} payloads", raw_records.len());
        self.monitor.log_stats("extract");

        tracing::info!("🔄 Normalizing attributes...");
        let batch = self.pipeline.transform(raw_records).await?;
        tracing::info!(
            "🔄 Normalized {} listings ({} skipped)",
            batch.listings.len(),
            batch.skipped.len()
        );
        self.monitor.log_stats("transform");

        tracing::info!("💾 Writing output...");
        let output_path = self.pipeline.load(batch).await?;
        tracing::info!("💾 Output saved to: {}", output_path);
        self.monitor.log_stats("load");

        self.monitor.log_final_stats();
        Ok(output_path)
    }
}
