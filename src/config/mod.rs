//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `VERIFIER_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::author::{AuthorConfig, DEFAULT_EXCLUDED_NAMES, DEFAULT_NOISE_TOKENS};
use crate::constants::{
    DEFAULT_DOCUMENT_THRESHOLD, DEFAULT_SIMILARITY_THRESHOLD, MIN_SENTENCE_CHARS,
    validate_threshold,
};
use crate::nlp::{EntitiesConfig, SimilarityConfig, TopicConfig};
use crate::verification::{ComparisonConfig, VerifierConfig, default_workers};

/// Log output format of the binary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidLogFormat {
                value: s.to_string(),
            }),
        }
    }
}

/// Pipeline configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `VERIFIER_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding one JSON document per assignment. Default: `./.data`.
    pub storage_path: PathBuf,

    /// Sentence-embedding model directory. Unset: lexical similarity.
    pub similarity_model_path: Option<PathBuf>,

    /// Token-classification (NER) model directory. Unset: heuristic name finder.
    pub ner_model_path: Option<PathBuf>,

    /// Topic classifier model directory. Unset: topics stay `Undefined`.
    pub topic_model_path: Option<PathBuf>,

    /// Default: `0.95`.
    pub similarity_threshold: f32,

    /// Default: `0.991`.
    pub document_threshold: f32,

    /// Default: `21`.
    pub min_sentence_chars: usize,

    /// Max concurrent comparisons. Default: available parallelism.
    pub workers: usize,

    /// Default: `true`.
    pub plagiarism_detection: bool,

    /// Names never reported as authors.
    pub excluded_names: Vec<String>,

    /// Tokens stripped from candidate author names.
    pub noise_tokens: Vec<String>,

    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("./.data"),
            similarity_model_path: None,
            ner_model_path: None,
            topic_model_path: None,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            document_threshold: DEFAULT_DOCUMENT_THRESHOLD,
            min_sentence_chars: MIN_SENTENCE_CHARS,
            workers: default_workers(),
            plagiarism_detection: true,
            excluded_names: to_strings(DEFAULT_EXCLUDED_NAMES),
            noise_tokens: to_strings(DEFAULT_NOISE_TOKENS),
            log_format: LogFormat::Text,
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Config {
    const ENV_STORAGE_PATH: &'static str = "VERIFIER_STORAGE_PATH";
    const ENV_SIMILARITY_MODEL_PATH: &'static str = "VERIFIER_SIMILARITY_MODEL_PATH";
    const ENV_NER_MODEL_PATH: &'static str = "VERIFIER_NER_MODEL_PATH";
    const ENV_TOPIC_MODEL_PATH: &'static str = "VERIFIER_TOPIC_MODEL_PATH";
    const ENV_SIMILARITY_THRESHOLD: &'static str = "VERIFIER_SIMILARITY_THRESHOLD";
    const ENV_DOCUMENT_THRESHOLD: &'static str = "VERIFIER_DOCUMENT_THRESHOLD";
    const ENV_MIN_SENTENCE_CHARS: &'static str = "VERIFIER_MIN_SENTENCE_CHARS";
    const ENV_WORKERS: &'static str = "VERIFIER_WORKERS";
    const ENV_PLAGIARISM_DETECTION: &'static str = "VERIFIER_PLAGIARISM_DETECTION";
    const ENV_EXCLUDED_NAMES: &'static str = "VERIFIER_EXCLUDED_NAMES";
    const ENV_NOISE_TOKENS: &'static str = "VERIFIER_NOISE_TOKENS";
    const ENV_LOG_FORMAT: &'static str = "VERIFIER_LOG_FORMAT";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let storage_path = Self::parse_path_from_env(Self::ENV_STORAGE_PATH, defaults.storage_path);
        let similarity_model_path =
            Self::parse_optional_path_from_env(Self::ENV_SIMILARITY_MODEL_PATH);
        let ner_model_path = Self::parse_optional_path_from_env(Self::ENV_NER_MODEL_PATH);
        let topic_model_path = Self::parse_optional_path_from_env(Self::ENV_TOPIC_MODEL_PATH);
        let similarity_threshold = Self::parse_threshold_from_env(
            Self::ENV_SIMILARITY_THRESHOLD,
            defaults.similarity_threshold,
        )?;
        let document_threshold = Self::parse_threshold_from_env(
            Self::ENV_DOCUMENT_THRESHOLD,
            defaults.document_threshold,
        )?;
        let min_sentence_chars =
            Self::parse_usize_from_env(Self::ENV_MIN_SENTENCE_CHARS, defaults.min_sentence_chars)?;
        let workers = Self::parse_usize_from_env(Self::ENV_WORKERS, defaults.workers)?;
        let plagiarism_detection = Self::parse_bool_from_env(
            Self::ENV_PLAGIARISM_DETECTION,
            defaults.plagiarism_detection,
        )?;
        let excluded_names =
            Self::parse_list_from_env(Self::ENV_EXCLUDED_NAMES, defaults.excluded_names);
        let noise_tokens = Self::parse_list_from_env(Self::ENV_NOISE_TOKENS, defaults.noise_tokens);
        let log_format = match env::var(Self::ENV_LOG_FORMAT) {
            Ok(value) => value.parse()?,
            Err(_) => defaults.log_format,
        };

        let config = Self {
            storage_path,
            similarity_model_path,
            ner_model_path,
            topic_model_path,
            similarity_threshold,
            document_threshold,
            min_sentence_chars,
            workers,
            plagiarism_detection,
            excluded_names,
            noise_tokens,
            log_format,
        };

        if config.workers == 0 {
            return Err(ConfigError::InvalidWorkers { value: 0 });
        }

        Ok(config)
    }

    /// Validates paths and score invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_path.exists() && !self.storage_path.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.storage_path.clone(),
            });
        }

        for path in [
            &self.similarity_model_path,
            &self.ner_model_path,
            &self.topic_model_path,
        ]
        .into_iter()
        .flatten()
        {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        validate_threshold(self.similarity_threshold).map_err(|source| {
            ConfigError::InvalidThreshold {
                name: Self::ENV_SIMILARITY_THRESHOLD,
                source,
            }
        })?;
        validate_threshold(self.document_threshold).map_err(|source| {
            ConfigError::InvalidThreshold {
                name: Self::ENV_DOCUMENT_THRESHOLD,
                source,
            }
        })?;

        if self.workers == 0 {
            return Err(ConfigError::InvalidWorkers {
                value: self.workers,
            });
        }

        Ok(())
    }

    pub fn comparison(&self) -> ComparisonConfig {
        ComparisonConfig::new(self.similarity_threshold, self.document_threshold)
            .with_min_sentence_chars(self.min_sentence_chars)
    }

    pub fn verifier(&self) -> VerifierConfig {
        VerifierConfig::default()
            .with_comparison(self.comparison())
            .with_workers(self.workers)
            .with_detection(self.plagiarism_detection)
    }

    pub fn similarity(&self) -> SimilarityConfig {
        match &self.similarity_model_path {
            Some(path) => SimilarityConfig::new(path.clone()),
            None => SimilarityConfig::lexical(),
        }
    }

    pub fn entities(&self) -> EntitiesConfig {
        match &self.ner_model_path {
            Some(path) => EntitiesConfig::new(path.clone()),
            None => EntitiesConfig::heuristic(),
        }
    }

    pub fn topic(&self) -> TopicConfig {
        match &self.topic_model_path {
            Some(path) => TopicConfig::new(path.clone()),
            None => TopicConfig::disabled(),
        }
    }

    pub fn author(&self) -> AuthorConfig {
        AuthorConfig::new(self.excluded_names.clone(), self.noise_tokens.clone())
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_threshold_from_env(var_name: &'static str, default: f32) -> Result<f32, ConfigError> {
        match env::var(var_name) {
            Ok(value) => {
                let threshold: f32 = value.trim().parse().map_err(|e| {
                    ConfigError::ThresholdParseError {
                        name: var_name,
                        value: value.clone(),
                        source: e,
                    }
                })?;

                validate_threshold(threshold).map_err(|source| ConfigError::InvalidThreshold {
                    name: var_name,
                    source,
                })?;

                Ok(threshold)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_usize_from_env(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::CountParseError {
                    name: var_name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_bool_from_env(var_name: &'static str, default: bool) -> Result<bool, ConfigError> {
        match env::var(var_name) {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(true),
                "false" | "0" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidBool {
                    name: var_name,
                    value,
                }),
            },
            Err(_) => Ok(default),
        }
    }

    /// Comma separated; an empty variable means an empty list.
    fn parse_list_from_env(var_name: &str, default: Vec<String>) -> Vec<String> {
        match env::var(var_name) {
            Ok(value) => value
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
            Err(_) => default,
        }
    }
}
