use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_THRESHOLD: f64 = 80.0;
pub const DEFAULT_MIN_CALL_DELAY: f64 = 0.5;
pub const DEFAULT_LOOKUP_TIMEOUT: f64 = 10.0;

/// Invalid configuration is fatal at run start, before any processing.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("threshold must be within 0-100, got {0}")]
    InvalidThreshold(f64),
    #[error("unknown api choice '{0}' (expected primary, secondary or mock)")]
    UnknownApiChoice(String),
    #[error("the secondary directory API requires an API key")]
    MissingApiKey,
    #[error("minimum call delay must be non-negative, got {0}")]
    InvalidCallDelay(f64),
    #[error("lookup timeout must be positive, got {0}")]
    InvalidTimeout(f64),
}

/// Which external directory the run queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiChoice {
    /// OpenCorporates companies search (free tier).
    Primary,
    /// Authenticated secondary provider.
    Secondary,
    /// Deterministic mock records for offline testing.
    Mock,
}

impl FromStr for ApiChoice {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "primary" | "opencorporates" => Ok(ApiChoice::Primary),
            "secondary" | "refinitiv" => Ok(ApiChoice::Secondary),
            "mock" => Ok(ApiChoice::Mock),
            other => Err(ConfigError::UnknownApiChoice(other.to_string())),
        }
    }
}

impl fmt::Display for ApiChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiChoice::Primary => write!(f, "primary"),
            ApiChoice::Secondary => write!(f, "secondary"),
            ApiChoice::Mock => write!(f, "mock"),
        }
    }
}

/// Per-run configuration, validated once before processing starts.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Minimum composite score for an accepted match.
    pub threshold: f64,
    pub api_choice: ApiChoice,
    /// Key for the secondary provider; unused otherwise.
    pub api_key: Option<String>,
    /// Minimum delay between directory calls, in seconds.
    pub min_call_delay: f64,
    /// Timeout for one directory call, in seconds.
    pub lookup_timeout: f64,
    /// Run the additional boundary-detection pass with extended patterns.
    pub extended_patterns: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            threshold: DEFAULT_THRESHOLD,
            api_choice: ApiChoice::Primary,
            api_key: None,
            min_call_delay: DEFAULT_MIN_CALL_DELAY,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            extended_patterns: false,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&self.threshold) {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        if self.min_call_delay < 0.0 {
            return Err(ConfigError::InvalidCallDelay(self.min_call_delay));
        }
        if self.lookup_timeout <= 0.0 {
            return Err(ConfigError::InvalidTimeout(self.lookup_timeout));
        }
        if self.api_choice == ApiChoice::Secondary && self.api_key.is_none() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(())
    }
}
