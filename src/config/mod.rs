pub mod cli;
pub mod toml_config;

use crate::core::scorer::ScoreWeights;
use crate::utils::error::{MatchError, Result};
use crate::utils::validation;

#[cfg(feature = "cli")]
use crate::adapters::notifier::DEFAULT_SENDER;
#[cfg(feature = "cli")]
use crate::core::ranking::DEFAULT_SHORTLIST_THRESHOLD;
#[cfg(feature = "cli")]
use crate::core::scorer::{DEFAULT_EDUCATION_WEIGHT, DEFAULT_SKILL_WEIGHT};
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "resume-match")]
#[command(about = "Match job descriptions against candidate résumés and shortlist the best fits")]
pub struct CliConfig {
    /// CSV file with "Job Title" and "Job Description" columns
    #[arg(long)]
    pub jobs: String,

    /// Directory or .zip archive of plain-text résumés
    #[arg(long)]
    pub resumes: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Shortlist threshold on the 0-100 score scale
    #[arg(long, default_value_t = DEFAULT_SHORTLIST_THRESHOLD)]
    pub threshold: f64,

    #[arg(long, default_value_t = DEFAULT_SKILL_WEIGHT)]
    pub skill_weight: f64,

    #[arg(long, default_value_t = DEFAULT_EDUCATION_WEIGHT)]
    pub education_weight: f64,

    /// Signature used in interview invitations
    #[arg(long, default_value = DEFAULT_SENDER)]
    pub sender: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log the duration of each pipeline phase")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn jobs_path(&self) -> &str {
        &self.jobs
    }

    fn resumes_path(&self) -> &str {
        &self.resumes
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn threshold(&self) -> f64 {
        self.threshold
    }

    fn weights(&self) -> ScoreWeights {
        ScoreWeights {
            skills: self.skill_weight,
            education: self.education_weight,
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("jobs", &self.jobs)?;
        validation::validate_file_extension("jobs", &self.jobs, &["csv"])?;
        validation::validate_path("resumes", &self.resumes)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_threshold("threshold", self.threshold)?;
        validation::validate_non_empty_string("sender", &self.sender)?;
        validate_weights(self.weights())
    }
}


/// 權重需各自落在 [0, 1] 且總和為 1，分數才會維持在 0–100
pub fn validate_weights(weights: ScoreWeights) -> Result<()> {
    validation::validate_range("skill_weight", weights.skills, 0.0, 1.0)?;
    validation::validate_range("education_weight", weights.education, 0.0, 1.0)?;

    let total = weights.skills + weights.education;
    if (total - 1.0).abs() > 1e-9 {
        return Err(MatchError::ConfigValidationError {
            field: "weights".to_string(),
            message: format!("skill and education weights must sum to 1.0, got {}", total),
        });
    }
    Ok(())
}
