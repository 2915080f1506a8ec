use crate::core::scorer::ScoreWeights;
use crate::domain::model::{
    CandidateProfile, Corpus, JobProfile, MatchRun, Notification, ShortlistEntry,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// 列出目錄下的檔案 (相對路徑，依字典序排序)
    fn list_files(&self, dir: &str)
        -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn jobs_path(&self) -> &str;
    fn resumes_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn threshold(&self) -> f64;
    fn weights(&self) -> ScoreWeights;
}

/// 從原始文字萃取結構化屬性
pub trait AttributeExtractor: Send + Sync {
    fn extract_job(&self, id: u64, title: &str, text: &str) -> JobProfile;
    fn extract_candidate(&self, id: u64, text: &str) -> CandidateProfile;
}

/// 配對結果的持久化，每次執行整批取代
pub trait MatchRepository: Send + Sync {
    fn replace_run(&self, run: &MatchRun)
        -> impl std::future::Future<Output = Result<()>> + Send;
    fn load_run(&self) -> impl std::future::Future<Output = Result<Option<MatchRun>>> + Send;
}

pub trait Notifier: Send + Sync {
    fn compose(
        &self,
        job: &JobProfile,
        candidate: &CandidateProfile,
        entry: &ShortlistEntry,
    ) -> Option<Notification>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Corpus>;
    async fn transform(&self, corpus: Corpus) -> Result<MatchRun>;
    async fn load(&self, run: MatchRun) -> Result<String>;
}
