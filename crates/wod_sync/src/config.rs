use crate::error::SyncError;
use chrono_tz::Tz;
use secrecy::SecretString;

pub const DEFAULT_BASE_URL: &str = "https://api.notion.com";
pub const DEFAULT_SOURCE_URL: &str = "https://wod.example.com/schedule";

/// Process-wide configuration, loaded once at startup and passed down.
/// Nothing in the pipeline reads the environment after this point.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_token: SecretString,
    pub root_page_id: String,
    pub base_url: String,
    /// The zone whose calendar date defines "today". The source page
    /// publishes dates in this zone, so the job must match them there no
    /// matter where it executes.
    pub timezone: Tz,
    /// Constant stamped into every created record's Source property.
    pub source_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, SyncError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function. This avoids mutating global environment in tests and keeps
    /// `from_env()` small and safe.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, SyncError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let token = get("WOD_STORE_TOKEN")
            .ok_or_else(|| SyncError::Config("WOD_STORE_TOKEN missing".into()))?;
        let root_page_id = get("WOD_ROOT_PAGE_ID")
            .ok_or_else(|| SyncError::Config("WOD_ROOT_PAGE_ID missing".into()))?;
        let base_url = get("WOD_STORE_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let timezone = match get("WOD_TIMEZONE") {
            Some(name) => name
                .parse::<Tz>()
                .map_err(|_| SyncError::Config(format!("unknown time zone: {name}")))?,
            None => chrono_tz::America::Sao_Paulo,
        };
        let source_url = get("WOD_SOURCE_URL").unwrap_or_else(|| DEFAULT_SOURCE_URL.into());
        Ok(Self {
            api_token: SecretString::new(token.into()),
            root_page_id,
            base_url,
            timezone,
            source_url,
        })
    }
}
