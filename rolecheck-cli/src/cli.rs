use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use secrecy::SecretString;

use rolecheck::{ClassifierConfig, RetryPolicy, DEFAULT_MODEL, DEFAULT_ROLE};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "rolecheck",
    version,
    about = "Run document role classification using an LLM."
)]
pub struct Args {
    /// Folder containing .txt documents
    #[arg(long, default_value = "sample_people")]
    pub input: PathBuf,

    /// Output JSON file
    #[arg(long, default_value = "results.json")]
    pub output: PathBuf,

    /// Role the documents are checked against
    #[arg(long, default_value = DEFAULT_ROLE)]
    pub role: String,

    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 60)]
    pub timeout_secs: u64,

    /// Pause before the single retry of a failed model call
    #[arg(long, default_value_t = 0)]
    pub retry_delay_ms: u64,
}

impl Args {
    pub fn api_key(&self) -> Result<SecretString> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(SecretString::new(key.to_string())),
            _ => bail!("Missing OPENAI_API_KEY. Put it in a .env file or set it in your environment."),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig::new(self.role.clone(), self.model.clone()).with_retry(
            RetryPolicy::single_retry().with_delay(Duration::from_millis(self.retry_delay_ms)),
        )
    }
}
