use crate::core::scorer::Scorer;
use crate::domain::model::{CandidateProfile, JobProfile, MatchScore, ShortlistEntry};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// 預設入選門檻 (0–100 分數尺度)
pub const DEFAULT_SHORTLIST_THRESHOLD: f64 = 80.0;

/// 以預設權重對所有職缺 × 人選評分
pub fn run_matching(jobs: &[JobProfile], candidates: &[CandidateProfile]) -> Vec<MatchScore> {
    Scorer::default().run_matching(jobs, candidates)
}

/// Selects the scores at or above `threshold`.
///
/// Each `(job_id, candidate_id)` pair appears at most once; if the input holds
/// the same pair twice the higher score is kept. Entries are ordered by job,
/// then by descending score, then by candidate.
pub fn shortlist(scores: &[MatchScore], threshold: f64) -> Vec<ShortlistEntry> {
    let mut unique: BTreeMap<(u64, u64), ShortlistEntry> = BTreeMap::new();

    for score in scores.iter().filter(|s| s.score >= threshold) {
        unique
            .entry((score.job_id, score.candidate_id))
            .and_modify(|existing| {
                if score.score > existing.score {
                    existing.score = score.score;
                }
            })
            .or_insert_with(|| ShortlistEntry::from(score));
    }

    let mut entries: Vec<ShortlistEntry> = unique.into_values().collect();
    entries.sort_by(|a, b| {
        a.job_id
            .cmp(&b.job_id)
            .then_with(|| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal))
            .then_with(|| a.candidate_id.cmp(&b.candidate_id))
    });
    entries
}

/// 指定職缺分數最高的前 `limit` 名人選
pub fn top_candidates(scores: &[MatchScore], job_id: u64, limit: usize) -> Vec<MatchScore> {
    let mut ranked: Vec<MatchScore> = scores.iter().filter(|s| s.job_id == job_id).copied().collect();
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.candidate_id.cmp(&b.candidate_id))
    });
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn score(job_id: u64, candidate_id: u64, score: f64) -> MatchScore {
        MatchScore {
            job_id,
            candidate_id,
            score,
        }
    }

    #[test]
    fn test_shortlist_default_threshold() {
        let scores = vec![
            score(1, 1, 100.0),
            score(1, 2, 15.0),
            score(1, 3, 82.5),
            score(1, 4, 79.9),
        ];

        let entries = shortlist(&scores, DEFAULT_SHORTLIST_THRESHOLD);
        let kept: Vec<(u64, f64)> = entries.iter().map(|e| (e.candidate_id, e.score)).collect();
        assert_eq!(kept, vec![(1, 100.0), (3, 82.5)]);
    }

    #[test]
    fn test_shortlist_threshold_is_inclusive() {
        let scores = vec![score(1, 1, 80.0), score(1, 2, 79.99)];
        let entries = shortlist(&scores, 80.0);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].candidate_id, 1);
    }

    #[test]
    fn test_shortlist_deduplicates_pairs() {
        let scores = vec![score(2, 5, 85.0), score(2, 5, 85.0), score(2, 5, 90.0)];
        let entries = shortlist(&scores, 80.0);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].score, 90.0);
    }

    #[test]
    fn test_shortlist_is_idempotent() {
        let scores = vec![score(1, 1, 95.0), score(2, 1, 81.0), score(2, 2, 40.0)];
        let first = shortlist(&scores, 80.0);
        let second = shortlist(&scores, 80.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_shortlist_orders_by_job_then_score() {
        let scores = vec![
            score(2, 1, 81.0),
            score(1, 3, 85.0),
            score(1, 1, 85.0),
            score(1, 2, 99.0),
        ];
        let order: Vec<(u64, u64)> = shortlist(&scores, 80.0)
            .iter()
            .map(|e| (e.job_id, e.candidate_id))
            .collect();
        assert_eq!(order, vec![(1, 2), (1, 1), (1, 3), (2, 1)]);
    }

    #[test]
    fn test_shortlist_monotonic_in_threshold() {
        let scores: Vec<MatchScore> = (0..=20)
            .map(|i| score(i % 3, i, (i * 5) as f64))
            .collect();
        let thresholds = [0.0, 15.0, 30.0, 50.0, 80.0, 100.0];

        for (i, &lower) in thresholds.iter().enumerate() {
            for &upper in &thresholds[i..] {
                let wide: HashSet<(u64, u64)> = shortlist(&scores, lower)
                    .iter()
                    .map(|e| (e.job_id, e.candidate_id))
                    .collect();
                let narrow: HashSet<(u64, u64)> = shortlist(&scores, upper)
                    .iter()
                    .map(|e| (e.job_id, e.candidate_id))
                    .collect();
                assert!(narrow.is_subset(&wide), "{} vs {}", lower, upper);
            }
        }
    }

    #[test]
    fn test_top_candidates() {
        let scores = vec![
            score(1, 1, 50.0),
            score(1, 2, 90.0),
            score(1, 3, 70.0),
            score(2, 4, 100.0),
        ];
        let top: Vec<u64> = top_candidates(&scores, 1, 2)
            .iter()
            .map(|s| s.candidate_id)
            .collect();
        assert_eq!(top, vec![2, 3]);
    }
}
