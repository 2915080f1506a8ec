use crate::adapters::documents::{read_job_postings, read_resumes};
use crate::adapters::extractor::RuleBasedExtractor;
use crate::adapters::notifier::{compose_notifications, InterviewInvitationNotifier};
use crate::core::ranking::{shortlist, top_candidates};
use crate::core::scorer::Scorer;
use crate::core::{
    AttributeExtractor, ConfigProvider, Corpus, MatchRepository, MatchRun, Notifier, Pipeline,
    Storage,
};
use crate::domain::model::{MatchScore, Notification, ShortlistEntry};
use crate::utils::error::{MatchError, Result};
use chrono::Utc;
use std::io::Write;
use std::sync::Arc;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const DEFAULT_REPORT_FILE: &str = "match_report.zip";

/// 讀取職缺與履歷、評分、篩選，並將結果寫入存儲
pub struct MatchingPipeline<S: Storage, R: MatchRepository, C: ConfigProvider> {
    source: S,
    sink: S,
    repository: R,
    config: C,
    extractor: Arc<dyn AttributeExtractor>,
    notifier: Arc<dyn Notifier>,
    report_file: String,
}

impl<S: Storage, R: MatchRepository, C: ConfigProvider> MatchingPipeline<S, R, C> {
    /// `source` 用於讀取輸入，`sink` 用於寫出報表
    pub fn new(source: S, sink: S, repository: R, config: C) -> Self {
        Self {
            source,
            sink,
            repository,
            config,
            extractor: Arc::new(RuleBasedExtractor::new()),
            notifier: Arc::new(InterviewInvitationNotifier::default()),
            report_file: DEFAULT_REPORT_FILE.to_string(),
        }
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn AttributeExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_report_file(mut self, report_file: &str) -> Self {
        self.report_file = report_file.to_string();
        self
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    fn scores_csv(rows: &[MatchScore]) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in rows {
            writer.serialize(row)?;
        }
        Self::finish_csv(writer)
    }

    fn shortlist_csv(rows: &[ShortlistEntry]) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in rows {
            writer.serialize(row)?;
        }
        Self::finish_csv(writer)
    }

    fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
        writer.into_inner().map_err(|e| MatchError::ProcessingError {
            message: format!("Failed to flush CSV output: {}", e),
        })
    }

    fn build_report(run: &MatchRun, notifications: &[Notification]) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

        zip.start_file("scores.csv", SimpleFileOptions::default())?;
        zip.write_all(&Self::scores_csv(&run.scores)?)?;

        zip.start_file("shortlist.csv", SimpleFileOptions::default())?;
        zip.write_all(&Self::shortlist_csv(&run.shortlist)?)?;

        zip.start_file("notifications.json", SimpleFileOptions::default())?;
        zip.write_all(serde_json::to_string_pretty(notifications)?.as_bytes())?;

        // 完成並取回底層 Vec<u8>
        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}

#[async_trait::async_trait]
impl<S: Storage, R: MatchRepository, C: ConfigProvider> Pipeline for MatchingPipeline<S, R, C> {
    async fn extract(&self) -> Result<Corpus> {
        let postings = read_job_postings(&self.source, self.config.jobs_path()).await?;
        let resumes = read_resumes(&self.source, self.config.resumes_path()).await?;

        // ID 依輸入順序從 1 開始編號
        let jobs = postings
            .iter()
            .zip(1u64..)
            .map(|(posting, id)| {
                self.extractor
                    .extract_job(id, &posting.title, &posting.description)
            })
            .collect();

        let candidates = resumes
            .iter()
            .zip(1u64..)
            .map(|(resume, id)| {
                tracing::debug!("Extracting candidate {} from {}", id, resume.source);
                self.extractor.extract_candidate(id, &resume.text)
            })
            .collect();

        Ok(Corpus { jobs, candidates })
    }

    async fn transform(&self, corpus: Corpus) -> Result<MatchRun> {
        let scorer = Scorer::new(self.config.weights());
        let threshold = self.config.threshold();

        let scores = scorer.run_matching(&corpus.jobs, &corpus.candidates);
        let shortlist = shortlist(&scores, threshold);

        for job in &corpus.jobs {
            if let Some(best) = top_candidates(&scores, job.id, 1).first() {
                tracing::debug!(
                    "Job {} '{}': best candidate {} scored {}",
                    job.id,
                    job.title,
                    best.candidate_id,
                    best.score
                );
            }
        }

        Ok(MatchRun {
            generated_at: Utc::now(),
            threshold,
            jobs: corpus.jobs,
            candidates: corpus.candidates,
            scores,
            shortlist,
        })
    }

    async fn load(&self, run: MatchRun) -> Result<String> {
        // 先整批取代舊結果，失敗時不寫出報表
        self.repository.replace_run(&run).await?;

        let notifications = compose_notifications(&run, self.notifier.as_ref());
        for notification in &notifications {
            tracing::info!(
                "📧 Invitation for job {} to {}: {}",
                notification.job_id,
                notification.recipient,
                notification.subject
            );
        }

        let report = Self::build_report(&run, &notifications)?;
        tracing::debug!("Writing report ({} bytes) to storage", report.len());
        self.sink.write_file(&self.report_file, &report).await?;

        Ok(format!(
            "{}/{}",
            self.config.output_path().trim_end_matches('/'),
            self.report_file
        ))
    }
}
