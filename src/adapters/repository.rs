use crate::core::{MatchRepository, Storage};
use crate::domain::model::MatchRun;
use crate::utils::error::{MatchError, Result};
use std::sync::Arc;
use tokio::sync::Mutex;

pub const SNAPSHOT_FILE: &str = "match_run.json";

fn ensure_references(run: &MatchRun) -> Result<()> {
    match run.find_dangling_reference() {
        Some((job_id, candidate_id)) => Err(MatchError::DanglingReference {
            job_id,
            candidate_id,
        }),
        None => Ok(()),
    }
}

/// 記憶體內的配對結果，主要用於測試與一次性執行
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    run: Arc<Mutex<Option<MatchRun>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MatchRepository for InMemoryRepository {
    async fn replace_run(&self, run: &MatchRun) -> Result<()> {
        ensure_references(run)?;
        let mut stored = self.run.lock().await;
        *stored = Some(run.clone());
        Ok(())
    }

    async fn load_run(&self) -> Result<Option<MatchRun>> {
        Ok(self.run.lock().await.clone())
    }
}

/// 以 JSON 快照檔保存整次執行結果
#[derive(Debug, Clone)]
pub struct SnapshotRepository<S: Storage> {
    storage: S,
    file_name: String,
}

impl<S: Storage> SnapshotRepository<S> {
    pub fn new(storage: S) -> Self {
        Self::with_file_name(storage, SNAPSHOT_FILE)
    }

    pub fn with_file_name(storage: S, file_name: &str) -> Self {
        Self {
            storage,
            file_name: file_name.to_string(),
        }
    }
}

impl<S: Storage> MatchRepository for SnapshotRepository<S> {
    async fn replace_run(&self, run: &MatchRun) -> Result<()> {
        ensure_references(run)?;
        let data = serde_json::to_vec_pretty(run)?;
        tracing::debug!("Writing match snapshot ({} bytes) to {}", data.len(), self.file_name);
        self.storage.write_file(&self.file_name, &data).await
    }

    async fn load_run(&self) -> Result<Option<MatchRun>> {
        match self.storage.read_file(&self.file_name).await {
            Ok(data) => Ok(Some(serde_json::from_slice(&data)?)),
            Err(MatchError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}
