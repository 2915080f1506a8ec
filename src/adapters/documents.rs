//! Readers for the raw inputs: the job descriptions CSV and the résumé
//! collection (a directory or a ZIP archive of PDF or plain-text documents).

use crate::core::Storage;
use crate::utils::error::{MatchError, Result};
use serde::Deserialize;
use std::io::{Cursor, Read};

const RESUME_EXTENSIONS: &[&str] = &["pdf", "txt", "md"];

/// CSV 中的一筆職缺
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JobPosting {
    #[serde(rename = "Job Title")]
    pub title: String,
    #[serde(rename = "Job Description")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResumeDocument {
    pub source: String,
    pub text: String,
}

/// UTF-8 解碼失敗時以 ISO-8859-1 解碼
pub fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

pub fn parse_job_postings(bytes: &[u8]) -> Result<Vec<JobPosting>> {
    let text = decode_text(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let mut postings = Vec::new();
    for row in reader.deserialize() {
        postings.push(row?);
    }
    Ok(postings)
}

pub async fn read_job_postings<S: Storage>(storage: &S, path: &str) -> Result<Vec<JobPosting>> {
    let bytes = storage.read_file(path).await?;
    let postings = parse_job_postings(&bytes)?;
    tracing::debug!("Read {} job postings from {}", postings.len(), path);
    Ok(postings)
}

fn extension(name: &str) -> Option<String> {
    std::path::Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

fn is_resume(name: &str) -> bool {
    extension(name)
        .map(|ext| RESUME_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

pub fn extract_pdf_text(bytes: &[u8]) -> Result<String> {
    // pdf-extract 遇到部分損毀的檔案會 panic 而非回傳錯誤
    let extracted = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
        .map_err(|_| MatchError::ProcessingError {
            message: "PDF parser panicked".to_string(),
        })?;

    extracted.map_err(|e| MatchError::ProcessingError {
        message: format!("PDF text extraction failed: {}", e),
    })
}

/// 依副檔名取得文字；無法解析的 PDF 記錄警告後略過
fn resume_document(name: String, bytes: &[u8]) -> Option<ResumeDocument> {
    let text = if extension(&name).as_deref() == Some("pdf") {
        match extract_pdf_text(bytes) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("⚠️ Skipping unreadable PDF résumé {}: {}", name, e);
                return None;
            }
        }
    } else {
        decode_text(bytes)
    };

    Some(ResumeDocument { source: name, text })
}

pub fn read_resume_archive(bytes: Vec<u8>) -> Result<Vec<ResumeDocument>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut documents = Vec::new();

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() {
            continue;
        }

        let name = file.name().to_string();
        if !is_resume(&name) {
            tracing::warn!("⚠️ Skipping unsupported résumé entry: {}", name);
            continue;
        }

        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        documents.extend(resume_document(name, &data));
    }

    documents.sort_by(|a, b| a.source.cmp(&b.source));
    Ok(documents)
}

/// 讀取履歷：路徑為 `.zip` 時解壓縮，否則視為目錄
pub async fn read_resumes<S: Storage>(storage: &S, path: &str) -> Result<Vec<ResumeDocument>> {
    let documents = if path.to_ascii_lowercase().ends_with(".zip") {
        let bytes = storage.read_file(path).await?;
        read_resume_archive(bytes)?
    } else {
        let mut documents = Vec::new();
        for name in storage.list_files(path).await? {
            if !is_resume(&name) {
                tracing::warn!("⚠️ Skipping unsupported résumé file: {}", name);
                continue;
            }
            let full_path = format!("{}/{}", path.trim_end_matches('/'), name);
            let bytes = storage.read_file(&full_path).await?;
            documents.extend(resume_document(name, &bytes));
        }
        documents
    };

    if documents.is_empty() {
        return Err(MatchError::ProcessingError {
            message: format!("No résumé documents (.pdf, .txt, .md) found in {}", path),
        });
    }

    tracing::debug!("Read {} résumés from {}", documents.len(), path);
    Ok(documents)
}
