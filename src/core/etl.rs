use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::PhaseMonitor;

/// 依序執行 extract → transform → load
pub struct MatchEngine<P: Pipeline> {
    pipeline: P,
    monitor_enabled: bool,
}

impl<P: Pipeline> MatchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor_enabled,
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting matching run...");
        let mut monitor = PhaseMonitor::new(self.monitor_enabled);

        // Extract
        monitor.start_phase();
        let corpus = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} jobs and {} candidates",
            corpus.jobs.len(),
            corpus.candidates.len()
        );
        monitor.end_phase("extract", corpus.jobs.len() + corpus.candidates.len());

        // Transform
        monitor.start_phase();
        let run = self.pipeline.transform(corpus).await?;
        tracing::info!(
            "Scored {} pairs, {} shortlisted at threshold {}",
            run.scores.len(),
            run.shortlist.len(),
            run.threshold
        );
        monitor.end_phase("transform", run.scores.len());

        // Load
        monitor.start_phase();
        let shortlisted = run.shortlist.len();
        let output_path = self.pipeline.load(run).await?;
        tracing::info!("Report saved to: {}", output_path);
        monitor.end_phase("load", shortlisted);

        monitor.log_final_stats();
        Ok(output_path)
    }
}
