use serde::{Deserialize, Serialize};

pub const FLAGGED_SEVERITIES: &[&str] = &["High", "Critical"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub timestamp: String,
    pub severity: String,
    pub vulnerability_type: String,
    pub url: String,
}

impl LogRecord {
    pub fn is_flagged(&self) -> bool {
        FLAGGED_SEVERITIES.contains(&self.severity.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Matched(LogRecord),
    Unmatched(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    Raw(String),
    Record(LogRecord),
}

impl Finding {
    pub fn as_record(&self) -> Option<&LogRecord> {
        match self {
            Finding::Record(r) => Some(r),
            Finding::Raw(_) => None,
        }
    }
}
