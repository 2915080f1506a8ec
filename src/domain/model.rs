use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// 正規化後的屬性集合 (技能、技術棧)
///
/// Tokens are lower-cased, trimmed and deduplicated; parsing the empty string
/// yields the empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSet(BTreeSet<String>);

impl AttributeSet {
    /// 解析以 ", " 串接的欄位
    pub fn parse(joined: &str) -> Self {
        Self::from_tokens(joined.split(','))
    }

    pub fn from_tokens<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Self(
            tokens
                .into_iter()
                .map(|token| token.as_ref().trim().to_lowercase())
                .filter(|token| !token.is_empty())
                .collect(),
        )
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn union(&self, other: &AttributeSet) -> AttributeSet {
        Self(self.0.union(&other.0).cloned().collect())
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        write!(f, "{}", joined.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobProfile {
    pub id: u64,
    pub title: String,
    pub skills: AttributeSet,
    pub education_requirement: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub education: String,
    pub experience_years: u32,
    pub skills: AttributeSet,
    pub tech_stack: AttributeSet,
    #[serde(default)]
    pub certifications: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub job_id: u64,
    pub candidate_id: u64,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShortlistEntry {
    pub job_id: u64,
    pub candidate_id: u64,
    pub score: f64,
}

impl From<&MatchScore> for ShortlistEntry {
    fn from(score: &MatchScore) -> Self {
        Self {
            job_id: score.job_id,
            candidate_id: score.candidate_id,
            score: score.score,
        }
    }
}

/// Extract 階段的輸出
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub jobs: Vec<JobProfile>,
    pub candidates: Vec<CandidateProfile>,
}

/// 一次完整配對執行的結果，整批寫入、整批取代
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRun {
    pub generated_at: DateTime<Utc>,
    pub threshold: f64,
    pub jobs: Vec<JobProfile>,
    pub candidates: Vec<CandidateProfile>,
    pub scores: Vec<MatchScore>,
    pub shortlist: Vec<ShortlistEntry>,
}

impl MatchRun {
    /// 第一個引用不存在的職缺或人選的 (job_id, candidate_id)
    pub fn find_dangling_reference(&self) -> Option<(u64, u64)> {
        let job_ids: BTreeSet<u64> = self.jobs.iter().map(|job| job.id).collect();
        let candidate_ids: BTreeSet<u64> = self.candidates.iter().map(|c| c.id).collect();

        let pairs = self
            .scores
            .iter()
            .map(|s| (s.job_id, s.candidate_id))
            .chain(self.shortlist.iter().map(|e| (e.job_id, e.candidate_id)));

        for (job_id, candidate_id) in pairs {
            if !job_ids.contains(&job_id) || !candidate_ids.contains(&candidate_id) {
                return Some((job_id, candidate_id));
            }
        }
        None
    }

    /// 將入選名單與職缺、人選資料關聯起來
    pub fn shortlisted_pairs(
        &self,
    ) -> impl Iterator<Item = (&JobProfile, &CandidateProfile, &ShortlistEntry)> {
        let jobs: HashMap<u64, &JobProfile> = self.jobs.iter().map(|j| (j.id, j)).collect();
        let candidates: HashMap<u64, &CandidateProfile> =
            self.candidates.iter().map(|c| (c.id, c)).collect();

        self.shortlist.iter().filter_map(move |entry| {
            let job = jobs.get(&entry.job_id)?;
            let candidate = candidates.get(&entry.candidate_id)?;
            Some((*job, *candidate, entry))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub job_id: u64,
    pub candidate_id: u64,
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_set_normalizes_tokens() {
        let set = AttributeSet::parse("Python,  SQL , python, ,Docker");
        assert_eq!(set.len(), 3);
        assert!(set.contains("python"));
        assert!(set.contains("sql"));
        assert!(set.contains("docker"));
        assert_eq!(set.to_string(), "docker, python, sql");
    }

    #[test]
    fn test_attribute_set_empty_string_is_empty() {
        assert!(AttributeSet::parse("").is_empty());
        assert!(AttributeSet::parse(" , ").is_empty());
    }

    #[test]
    fn test_find_dangling_reference() {
        let mut run = MatchRun {
            generated_at: Utc::now(),
            threshold: 80.0,
            jobs: vec![JobProfile {
                id: 1,
                title: "Data Engineer".to_string(),
                skills: AttributeSet::parse("python"),
                education_requirement: String::new(),
            }],
            candidates: vec![],
            scores: vec![],
            shortlist: vec![],
        };
        assert_eq!(run.find_dangling_reference(), None);

        run.scores.push(MatchScore {
            job_id: 1,
            candidate_id: 7,
            score: 30.0,
        });
        assert_eq!(run.find_dangling_reference(), Some((1, 7)));
    }
}
