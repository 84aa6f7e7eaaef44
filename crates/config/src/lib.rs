use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Root application settings.
///
/// Layered from `config/default.toml` (optional) and environment variables
/// with the `PREPCOACH__` prefix (e.g. `PREPCOACH__DATABASE__URI`).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub evaluation: EvaluationSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3080,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub uri: String,
    pub name: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            name: "prepcoach".to_string(),
        }
    }
}

/// Settings for the external LLM scoring service.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    /// Base URL of an OpenAI-compatible chat-completions API.
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    /// Kept low so repeated evaluations of the same transcript stay close.
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Request timeout in seconds for one scoring call.
    pub timeout_secs: u64,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            max_output_tokens: 4096,
            timeout_secs: 60,
        }
    }
}

/// Tunables for the transcript evaluation pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationSettings {
    /// Minimum candidate turns before a transcript is scoreable.
    pub min_user_turns: usize,
    /// Minimum total candidate words before a transcript is scoreable.
    pub min_total_words: usize,
    /// Minimum words for a turn to count as an answered question.
    pub min_words_per_answer: usize,
    /// Turns shorter than this many characters are dropped on ingest.
    pub min_turn_chars: usize,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            min_user_turns: 2,
            min_total_words: 30,
            min_words_per_answer: 10,
            min_turn_chars: 2,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(Environment::with_prefix("PREPCOACH").separator("__"))
            .build()?
            .try_deserialize()
    }
}
