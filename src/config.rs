use std::time::Duration;

use crate::errors::BrightError;

pub const DEFAULT_BASE_URL: &str = "https://app.brightsec.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const AUTH_SCHEME: &str = "Api-Key";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            api_key: normalize_api_key(&api_key.into()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn validate(&self) -> Result<(), BrightError> {
        if self.api_key.is_empty() {
            return Err(BrightError::Config(
                "API key not found. Pass --api-key or set BRIGHTSEC_API_KEY".to_string(),
            ));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(BrightError::Config(format!(
                "Base URL must start with http:// or https://: '{}'",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(BrightError::Config("Timeout must be greater than zero".to_string()));
        }
        Ok(())
    }

    pub fn authorization(&self) -> String {
        format!("{} {}", AUTH_SCHEME, self.api_key)
    }
}

pub fn normalize_api_key(raw: &str) -> String {
    let trimmed = raw.trim();
    let lower = trimmed.to_ascii_lowercase();
    match lower.strip_prefix("api-key") {
        Some(rest) if rest.starts_with(char::is_whitespace) => trimmed[7..].trim().to_string(),
        _ => trimmed.to_string(),
    }
}
