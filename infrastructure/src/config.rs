use anyhow::Context;
use dotenvy::dotenv;
use shared::types::Result;
use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub http_timeout: Duration,
    pub admin_refresh_interval: Duration,
    pub toast_duration: Duration,
}

impl Config {
    /// Reads `.env` (when present) and then the process environment.
    pub fn load() -> Result<Self> {
        dotenv().ok();
        Ok(Self {
            api_base_url: env::var("MESA_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            http_timeout: seconds_var("MESA_HTTP_TIMEOUT_SECS", 30)?,
            admin_refresh_interval: seconds_var("MESA_ADMIN_REFRESH_SECS", 30)?,
            toast_duration: seconds_var("MESA_TOAST_SECS", 5)?,
        })
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_admin_refresh_interval(mut self, interval: Duration) -> Self {
        self.admin_refresh_interval = interval;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(30),
            admin_refresh_interval: Duration::from_secs(30),
            toast_duration: Duration::from_secs(5),
        }
    }
}

fn seconds_var(name: &str, default: u64) -> Result<Duration> {
    match env::var(name) {
        Ok(raw) => {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds, got {:?}", name, raw))?;
            Ok(Duration::from_secs(secs))
        }
        Err(_) => Ok(Duration::from_secs(default)),
    }
}
