use std::time::Duration;

use config::{Config, Environment as EnvironmentSource, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub dashscope: DashScopeSettings,
    pub oss: OssSettings,
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub records: RecordSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashScopeSettings {
    pub api_key: String,
    #[serde(default = "default_dashscope_base_url")]
    pub base_url: String,
    #[serde(default = "default_compatible_base_url")]
    pub compatible_base_url: String,
    #[serde(default = "default_asr_model")]
    pub asr_model: String,
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OssSettings {
    pub endpoint: String,
    #[serde(default = "default_oss_region")]
    pub region: String,
    pub bucket: String,
    pub access_key_id: String,
    pub access_key_secret: String,
    #[serde(default = "default_url_ttl_secs")]
    pub url_ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisSettings {
    pub language_hints: Vec<String>,
    pub speaker_count: u32,
    pub poll_interval_secs: u64,
    pub poll_timeout_secs: u64,
    pub min_transcript_chars: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordSettings {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

fn default_dashscope_base_url() -> String {
    "https://dashscope.aliyuncs.com".to_string()
}

fn default_compatible_base_url() -> String {
    "https://dashscope.aliyuncs.com/compatible-mode/v1".to_string()
}

fn default_asr_model() -> String {
    "paraformer-v1".to_string()
}

fn default_chat_model() -> String {
    "qwen-plus".to_string()
}

fn default_temperature() -> f32 {
    0.1
}

fn default_oss_region() -> String {
    "cn-shenzhen".to_string()
}

fn default_url_ttl_secs() -> u64 {
    3600
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            language_hints: vec!["zh".to_string(), "en".to_string()],
            speaker_count: 2,
            poll_interval_secs: 2,
            poll_timeout_secs: 600,
            min_transcript_chars: 12,
        }
    }
}

impl Default for RecordSettings {
    fn default() -> Self {
        Self {
            path: "data/consultations.jsonl".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enable_json: false,
        }
    }
}

impl Settings {
    /// Layered load: `appsettings.{env}` file, then `APP`-prefixed
    /// environment variables (`APP__DASHSCOPE__API_KEY`, ...).
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let configuration = Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(EnvironmentSource::with_prefix("APP").separator("__"))
            .build()?;

        let settings: Settings = configuration.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Fail fast at construction time instead of at the first remote call.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.dashscope.api_key.trim().is_empty() {
            return Err(SettingsError::MissingCredential("dashscope.api_key"));
        }
        if self.oss.access_key_id.trim().is_empty() {
            return Err(SettingsError::MissingCredential("oss.access_key_id"));
        }
        if self.oss.access_key_secret.trim().is_empty() {
            return Err(SettingsError::MissingCredential("oss.access_key_secret"));
        }
        if self.oss.bucket.trim().is_empty() {
            return Err(SettingsError::MissingCredential("oss.bucket"));
        }
        if self.analysis.speaker_count == 0 {
            return Err(SettingsError::Invalid(
                "analysis.speaker_count must be at least 1".to_string(),
            ));
        }
        if self.analysis.poll_interval_secs == 0 {
            return Err(SettingsError::Invalid(
                "analysis.poll_interval_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn url_ttl(&self) -> Duration {
        Duration::from_secs(self.oss.url_ttl_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.analysis.poll_interval_secs)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.analysis.poll_timeout_secs)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("missing required credential: {0}")]
    MissingCredential(&'static str),
    #[error("invalid setting: {0}")]
    Invalid(String),
}
