//! Job × candidate scoring.
//!
//! The score is a fixed linear combination of two sub-scores:
//!
//! * skill coverage: the fraction of the job's skills found in the candidate's
//!   declared skills or detected tech stack (0 when the job lists no skills);
//! * education: 1.0 when the job's requirement occurs in the candidate's
//!   education statement, 0.5 otherwise. An empty requirement always matches.
//!
//! The weighted sum is rounded to two decimals and reported on a 0–100 scale.

use crate::domain::model::{AttributeSet, CandidateProfile, JobProfile, MatchScore};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SKILL_WEIGHT: f64 = 0.7;
pub const DEFAULT_EDUCATION_WEIGHT: f64 = 0.3;

/// 學歷字串不符時的部分分數
pub const EDUCATION_PARTIAL_CREDIT: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub skills: f64,
    pub education: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            skills: DEFAULT_SKILL_WEIGHT,
            education: DEFAULT_EDUCATION_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub skill_score: f64,
    pub education_score: f64,
    pub score: f64,
}

pub fn skill_score(job_skills: &AttributeSet, skills: &AttributeSet, tech_stack: &AttributeSet) -> f64 {
    if job_skills.is_empty() {
        return 0.0;
    }

    let covered = job_skills
        .iter()
        .filter(|skill| skills.contains(skill) || tech_stack.contains(skill))
        .count();
    covered as f64 / job_skills.len() as f64
}

/// 僅比較小寫，不修剪空白
pub fn education_score(requirement: &str, education: &str) -> f64 {
    if education.to_lowercase().contains(&requirement.to_lowercase()) {
        1.0
    } else {
        EDUCATION_PARTIAL_CREDIT
    }
}

/// 先依 f64 的精確十進位值取兩位小數，再放大到 0–100
fn to_percent(raw: f64) -> f64 {
    let rounded = format!("{:.2}", raw).parse::<f64>().unwrap_or(raw);
    // 去除 0.29 * 100 之類的二進位誤差
    (rounded * 100.0).round().clamp(0.0, 100.0)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer {
    weights: ScoreWeights,
}

impl Scorer {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn breakdown(&self, job: &JobProfile, candidate: &CandidateProfile) -> ScoreBreakdown {
        let skill_score = skill_score(&job.skills, &candidate.skills, &candidate.tech_stack);
        let education_score = education_score(&job.education_requirement, &candidate.education);
        let raw = self.weights.skills * skill_score + self.weights.education * education_score;

        ScoreBreakdown {
            skill_score,
            education_score,
            score: to_percent(raw),
        }
    }

    pub fn score(&self, job: &JobProfile, candidate: &CandidateProfile) -> f64 {
        self.breakdown(job, candidate).score
    }

    /// 職缺 × 人選的完整笛卡兒積，依職缺、再依人選的輸入順序輸出
    pub fn run_matching(
        &self,
        jobs: &[JobProfile],
        candidates: &[CandidateProfile],
    ) -> Vec<MatchScore> {
        let mut scores = Vec::with_capacity(jobs.len() * candidates.len());
        for job in jobs {
            for candidate in candidates {
                scores.push(MatchScore {
                    job_id: job.id,
                    candidate_id: candidate.id,
                    score: self.score(job, candidate),
                });
            }
            tracing::debug!("Scored job {} against {} candidates", job.id, candidates.len());
        }
        scores
    }
}

/// 以預設權重 (70% 技能 / 30% 學歷) 計算分數
pub fn compute_score(job: &JobProfile, candidate: &CandidateProfile) -> f64 {
    Scorer::default().score(job, candidate)
}
