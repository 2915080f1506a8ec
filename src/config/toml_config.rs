use crate::adapters::notifier::{InterviewInvitationNotifier, DEFAULT_SENDER};
use crate::core::ranking::DEFAULT_SHORTLIST_THRESHOLD;
use crate::core::scorer::{ScoreWeights, DEFAULT_EDUCATION_WEIGHT, DEFAULT_SKILL_WEIGHT};
use crate::core::ConfigProvider;
use crate::utils::error::{MatchError, Result};
use crate::utils::validation::{self, Validate};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SLOT_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    pub load: LoadConfig,
    pub notify: Option<NotifyConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub jobs_path: String,
    pub resumes_path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub threshold: Option<f64>,
    pub skill_weight: Option<f64>,
    pub education_weight: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub report_filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    pub sender: Option<String>,
    /// 面試時段，格式 `2025-04-11T10:00`
    pub slots: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MatchError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MatchError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RESUME_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MatchError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("pipeline.name", &self.pipeline.name)?;
        validation::validate_path("source.jobs_path", &self.source.jobs_path)?;
        validation::validate_file_extension("source.jobs_path", &self.source.jobs_path, &["csv"])?;
        validation::validate_path("source.resumes_path", &self.source.resumes_path)?;
        validation::validate_path("load.output_path", &self.load.output_path)?;

        if let Some(report) = &self.load.report_filename {
            validation::validate_file_extension("load.report_filename", report, &["zip"])?;
        }

        validation::validate_threshold("scoring.threshold", self.threshold())?;
        super::validate_weights(self.weights())?;

        if let Some(notify) = &self.notify {
            if let Some(sender) = &notify.sender {
                validation::validate_non_empty_string("notify.sender", sender)?;
            }
        }
        self.interview_slots()?;

        if let Some(format) = self.monitoring.as_ref().and_then(|m| m.log_format.as_deref()) {
            if !["compact", "json"].contains(&format) {
                return Err(MatchError::InvalidConfigValueError {
                    field: "monitoring.log_format".to_string(),
                    value: format.to_string(),
                    reason: "Valid formats: compact, json".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn threshold(&self) -> f64 {
        self.scoring.threshold.unwrap_or(DEFAULT_SHORTLIST_THRESHOLD)
    }

    pub fn weights(&self) -> ScoreWeights {
        ScoreWeights {
            skills: self.scoring.skill_weight.unwrap_or(DEFAULT_SKILL_WEIGHT),
            education: self
                .scoring
                .education_weight
                .unwrap_or(DEFAULT_EDUCATION_WEIGHT),
        }
    }

    pub fn report_filename(&self) -> &str {
        self.load
            .report_filename
            .as_deref()
            .unwrap_or(crate::core::pipeline::DEFAULT_REPORT_FILE)
    }

    pub fn sender(&self) -> &str {
        self.notify
            .as_ref()
            .and_then(|n| n.sender.as_deref())
            .unwrap_or(DEFAULT_SENDER)
    }

    /// 解析面試時段，未設定時使用預設時段
    pub fn interview_slots(&self) -> Result<Vec<NaiveDateTime>> {
        let Some(slots) = self.notify.as_ref().and_then(|n| n.slots.as_ref()) else {
            return Ok(InterviewInvitationNotifier::default_slots());
        };

        slots
            .iter()
            .map(|slot| {
                NaiveDateTime::parse_from_str(slot, SLOT_FORMAT).map_err(|e| {
                    MatchError::InvalidConfigValueError {
                        field: "notify.slots".to_string(),
                        value: slot.clone(),
                        reason: format!("expected {}: {}", SLOT_FORMAT, e),
                    }
                })
            })
            .collect()
    }

    pub fn notifier(&self) -> Result<InterviewInvitationNotifier> {
        Ok(InterviewInvitationNotifier::new(
            self.sender(),
            self.interview_slots()?,
        ))
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_format.as_deref())
            == Some("json")
    }
}

impl ConfigProvider for TomlConfig {
    fn jobs_path(&self) -> &str {
        &self.source.jobs_path
    }

    fn resumes_path(&self) -> &str {
        &self.source.resumes_path
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn threshold(&self) -> f64 {
        self.threshold()
    }

    fn weights(&self) -> ScoreWeights {
        self.weights()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[pipeline]
name = "quarterly-hiring"
description = "Match Q3 openings"
version = "1.0.0"

[source]
jobs_path = "data/job_description.csv"
resumes_path = "data/cvs.zip"

[load]
output_path = "./match-output"
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = TomlConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.pipeline.name, "quarterly-hiring");
        assert_eq!(config.jobs_path(), "data/job_description.csv");
        assert_eq!(ConfigProvider::threshold(&config), 80.0);
        assert_eq!(ConfigProvider::weights(&config), ScoreWeights::default());
        assert_eq!(config.report_filename(), "match_report.zip");
        assert_eq!(config.sender(), "HR Team");
        assert_eq!(config.interview_slots().unwrap().len(), 2);
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_scoring_and_notify_sections() {
        let toml_content = format!(
            r#"{}
[scoring]
threshold = 65.0
skill_weight = 0.6
education_weight = 0.4

[notify]
sender = "Talent Acquisition"
slots = ["2025-05-02T09:15"]

[monitoring]
enabled = true
log_format = "json"
"#,
            BASIC
        );

        let config = TomlConfig::from_toml_str(&toml_content).unwrap();
        assert_eq!(config.threshold(), 65.0);
        assert_eq!(config.weights().skills, 0.6);
        assert_eq!(config.sender(), "Talent Acquisition");
        assert_eq!(
            config.interview_slots().unwrap()[0].format("%B %-d, %-I:%M %p").to_string(),
            "May 2, 9:15 AM"
        );
        assert!(config.monitoring_enabled());
        assert!(config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("RESUME_MATCH_TEST_CVS", "/data/cvs");

        let toml_content = r#"
[pipeline]
name = "env"
description = "env"
version = "1.0"

[source]
jobs_path = "jobs.csv"
resumes_path = "${RESUME_MATCH_TEST_CVS}"

[load]
output_path = "./output"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source.resumes_path, "/data/cvs");

        std::env::remove_var("RESUME_MATCH_TEST_CVS");
    }

    #[test]
    fn test_fractional_weights_must_sum_to_one() {
        let toml_content = format!("{}\n[scoring]\nskill_weight = 0.9\n", BASIC);
        let config = TomlConfig::from_toml_str(&toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_slot_is_rejected() {
        let toml_content = format!("{}\n[notify]\nslots = [\"next tuesday\"]\n", BASIC);
        let config = TomlConfig::from_toml_str(&toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(MatchError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.pipeline.name, "quarterly-hiring");
    }
}
