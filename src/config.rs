use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Servings used whenever a source carries no usable integer.
pub const DEFAULT_SERVINGS: u32 = 4;

/// Pipeline configuration.
///
/// The fallback text limit is deliberately a single knob: the original
/// behavior used two different truncation bounds at different call sites
/// with no stated rationale, so it is kept configurable instead of guessing
/// which bound was intended.
#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    /// Maximum length (in characters) of the cleaned page text returned
    /// when structured extraction fails.
    #[serde(default = "default_fallback_text_limit")]
    pub fallback_text_limit: usize,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// User agent sent with page fetches.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        ImportConfig {
            fallback_text_limit: default_fallback_text_limit(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_fallback_text_limit() -> usize {
    5000
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

impl ImportConfig {
    /// Load configuration from file and environment variables.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables with RECETTE__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECETTE__FALLBACK_TEXT_LIMIT
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("RECETTE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
