use thiserror::Error;

pub const EXIT_OK: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_CONFIG: i32 = 2;
pub const EXIT_NOTHING_TO_DO: i32 = 3;
pub const EXIT_PARTIAL: i32 = 4;
pub const EXIT_AUTH: i32 = 5;

#[derive(Debug, Error)]
pub enum BrightError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication rejected (HTTP {status}): {body}")]
    Auth { status: u16, body: String },

    #[error("Request failed with status code {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Corrupt archive: {0}")]
    CorruptArchive(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BrightError {
    pub fn exit_code(&self) -> i32 {
        match self {
            BrightError::Config(_) => EXIT_CONFIG,
            BrightError::Auth { .. } => EXIT_AUTH,
            _ => EXIT_FAILED,
        }
    }

    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => BrightError::Auth { status, body },
            _ => BrightError::Http { status, body },
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(
            self,
            BrightError::Network(_) | BrightError::Http { .. } | BrightError::Timeout(_)
        )
    }
}

impl From<reqwest::Error> for BrightError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            BrightError::Timeout(e.to_string())
        } else {
            BrightError::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_statuses_are_distinguished() {
        assert!(matches!(
            BrightError::from_status(401, String::new()),
            BrightError::Auth { status: 401, .. }
        ));
        assert!(matches!(
            BrightError::from_status(403, String::new()),
            BrightError::Auth { status: 403, .. }
        ));
        assert!(matches!(
            BrightError::from_status(500, "boom".into()),
            BrightError::Http { status: 500, .. }
        ));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(BrightError::Config("x".into()).exit_code(), EXIT_CONFIG);
        assert_eq!(BrightError::from_status(403, String::new()).exit_code(), EXIT_AUTH);
        assert_eq!(BrightError::CorruptArchive("x".into()).exit_code(), EXIT_FAILED);
        assert_eq!(BrightError::Network("x".into()).exit_code(), EXIT_FAILED);
    }

    #[test]
    fn test_corrupt_archive_is_not_network() {
        assert!(!BrightError::CorruptArchive("bad magic".into()).is_network());
        assert!(BrightError::Network("refused".into()).is_network());
    }
}
