pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::extractor::RuleBasedExtractor;
pub use adapters::notifier::InterviewInvitationNotifier;
pub use adapters::repository::{InMemoryRepository, SnapshotRepository};
pub use config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::toml_config::TomlConfig;

pub use core::{
    etl::MatchEngine,
    pipeline::MatchingPipeline,
    ranking::{run_matching, shortlist, DEFAULT_SHORTLIST_THRESHOLD},
    scorer::{compute_score, ScoreWeights, Scorer},
};
pub use domain::model::{
    AttributeSet, CandidateProfile, JobProfile, MatchScore, Notification, ShortlistEntry,
};
pub use utils::error::{MatchError, Result};
