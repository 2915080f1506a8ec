use resume_match::{
    compute_score, run_matching, shortlist, AttributeSet, CandidateProfile, JobProfile,
    MatchScore, DEFAULT_SHORTLIST_THRESHOLD,
};
use std::collections::HashSet;

fn job(id: u64, skills: &str, education: &str) -> JobProfile {
    JobProfile {
        id,
        title: format!("Job {}", id),
        skills: AttributeSet::parse(skills),
        education_requirement: education.to_string(),
    }
}

fn candidate(id: u64, skills: &str, tech_stack: &str, education: &str) -> CandidateProfile {
    CandidateProfile {
        id,
        name: format!("Candidate {}", id),
        email: format!("candidate{}@example.com", id),
        education: education.to_string(),
        experience_years: 3,
        skills: AttributeSet::parse(skills),
        tech_stack: AttributeSet::parse(tech_stack),
        certifications: Vec::new(),
    }
}

fn corpus() -> (Vec<JobProfile>, Vec<CandidateProfile>) {
    let jobs = vec![
        job(1, "python, sql", "bachelor"),
        job(2, "java, kafka", "master"),
        job(3, "", "phd"),
        job(4, "React, Node, Docker", ""),
    ];
    let candidates = vec![
        candidate(1, "python", "sql, docker", "bachelor of science"),
        candidate(2, "", "", "bachelor"),
        candidate(3, "Java, Spring Boot", "kafka, react", "PhD in Physics"),
        candidate(4, "node", "DOCKER", "Master"),
    ];
    (jobs, candidates)
}

#[test]
fn test_documented_scenarios() {
    // skills fully covered through the tech stack, education substring match
    assert_eq!(
        compute_score(
            &job(1, "python, sql", "bachelor"),
            &candidate(1, "python", "sql, docker", "bachelor of science")
        ),
        100.0
    );

    // nothing covered, education mismatch
    assert_eq!(
        compute_score(&job(1, "java, kafka", "master"), &candidate(1, "", "", "bachelor")),
        15.0
    );

    // empty job skills only leave the education component
    assert_eq!(
        compute_score(&job(1, "", "master"), &candidate(1, "rust", "", "master of arts")),
        30.0
    );
    assert_eq!(
        compute_score(&job(1, "", "master"), &candidate(1, "rust", "", "diploma")),
        15.0
    );
}

#[test]
fn test_scores_are_bounded_and_deterministic() {
    let (jobs, candidates) = corpus();
    let first = run_matching(&jobs, &candidates);
    let second = run_matching(&jobs, &candidates);

    assert_eq!(first.len(), jobs.len() * candidates.len());
    for (a, b) in first.iter().zip(&second) {
        assert!((0.0..=100.0).contains(&a.score));
        assert_eq!((a.job_id, a.candidate_id), (b.job_id, b.candidate_id));
        assert_eq!(a.score.to_bits(), b.score.to_bits());
    }
}

#[test]
fn test_empty_job_skills_ignore_candidate_skills() {
    let job = job(1, "", "");
    let bare = candidate(1, "", "", "");
    let loaded = candidate(2, "python, java, go", "docker, aws", "phd");

    assert_eq!(compute_score(&job, &bare), compute_score(&job, &loaded));
}

#[test]
fn test_tech_stack_only_skill_counts() {
    let job = job(1, "kafka, sql", "");
    let with_stack = candidate(1, "sql", "kafka", "");
    let without_stack = candidate(2, "sql", "", "");

    assert!(compute_score(&job, &with_stack) > compute_score(&job, &without_stack));
    assert_eq!(compute_score(&job, &with_stack), 100.0);
}

#[test]
fn test_mixed_case_attributes_match() {
    let (jobs, candidates) = corpus();
    let scores = run_matching(&jobs, &candidates);
    let react_node_docker = scores
        .iter()
        .find(|s| s.job_id == 4 && s.candidate_id == 4)
        .unwrap();

    // node + docker of react, node, docker; empty education requirement
    // 0.7 * 2/3 + 0.3 = 0.7667
    assert_eq!(react_node_docker.score, 77.0);
}

#[test]
fn test_shortlist_example() {
    let scores = vec![
        MatchScore { job_id: 1, candidate_id: 1, score: 100.0 },
        MatchScore { job_id: 1, candidate_id: 2, score: 15.0 },
        MatchScore { job_id: 1, candidate_id: 3, score: 82.5 },
        MatchScore { job_id: 1, candidate_id: 4, score: 79.9 },
    ];

    let entries = shortlist(&scores, DEFAULT_SHORTLIST_THRESHOLD);
    let scores: Vec<f64> = entries.iter().map(|e| e.score).collect();
    assert_eq!(scores, vec![100.0, 82.5]);
}

#[test]
fn test_shortlist_monotonicity_over_real_scores() {
    let (jobs, candidates) = corpus();
    let scores = run_matching(&jobs, &candidates);

    let mut previous: Option<HashSet<(u64, u64)>> = None;
    for threshold in (0..=100).step_by(5).map(f64::from) {
        let current: HashSet<(u64, u64)> = shortlist(&scores, threshold)
            .iter()
            .map(|e| (e.job_id, e.candidate_id))
            .collect();
        if let Some(wider) = &previous {
            assert!(current.is_subset(wider), "threshold {}", threshold);
        }
        previous = Some(current);
    }
}
