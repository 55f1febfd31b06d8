use anyhow::{Context, Result};

/// Configuration for the feedback engine.
///
/// Read once at startup and immutable for the process lifetime; concurrent
/// requests share it read-only.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// API key (from GEMINI_API_KEY env var)
    pub api_key: String,
    /// Model to use (e.g., "gemini-2.0-flash")
    pub model: String,
    /// Per-attempt request timeout in seconds
    pub timeout_secs: u64,
    /// Extra attempts allowed on transient backend failures
    pub max_retries: u32,
    /// Base delay for exponential backoff between retries
    pub retry_base_delay_ms: u64,
    /// Maximum rendered transcript size in characters; larger inputs are
    /// rejected rather than truncated
    pub max_transcript_chars: usize,
}

impl EngineConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .context("GEMINI_API_KEY environment variable not set")?;

        let model = std::env::var("LECTERN_MODEL").unwrap_or_else(|_| "gemini-2.0-flash".to_string());

        Ok(Self {
            api_key,
            model,
            timeout_secs: env_parse("LECTERN_TIMEOUT_SECS", 30)?,
            max_retries: env_parse("LECTERN_MAX_RETRIES", 2)?,
            retry_base_delay_ms: 500,
            max_transcript_chars: env_parse("LECTERN_MAX_TRANSCRIPT_CHARS", 60_000)?,
        })
    }

    /// Create with custom settings
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            timeout_secs: 30,
            max_retries: 2,
            retry_base_delay_ms: 500,
            max_transcript_chars: 60_000,
        }
    }
}

fn env_parse<T: std::str::FromStr>(var: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(var) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", var, raw)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let config = EngineConfig::new("key".to_string(), "gemini-2.0-flash".to_string());
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.max_transcript_chars, 60_000);
        assert_eq!(config.timeout_secs, 30);
    }
}
