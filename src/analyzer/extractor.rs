use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::models::{Extraction, FLAGGED_SEVERITIES, Finding, LogRecord};

// <timestamp> - WARNING - Found new ‘<type>’ (<severity>) vulnerability at: <url> | {...}
static FINDING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?P<timestamp>.+?) - WARNING - Found new [‘'"]?(?P<kind>.+?)[’'"]? \((?P<severity>[^()]+)\) vulnerability at: (?P<url>.+?)(?: \| .*)?\s*$"#,
    )
    .expect("Invalid finding line pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    Raw,
    #[default]
    Structured,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeverityMatch {
    #[default]
    Substring,
    Field,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    pub mode: OutputMode,
    pub severity_match: SeverityMatch,
}

#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    pub findings: Vec<Finding>,
    pub lines: usize,
    pub candidates: usize,
    pub parse_errors: usize,
}

impl ExtractionReport {
    pub fn has_matches(&self) -> bool {
        !self.findings.is_empty()
    }
}

pub fn mentions_flagged_severity(line: &str) -> bool {
    FLAGGED_SEVERITIES.iter().any(|s| line.contains(s))
}

pub fn parse_line(line: &str) -> Extraction {
    let Some(caps) = FINDING_LINE.captures(line) else {
        return Extraction::Unmatched(line.to_string());
    };

    Extraction::Matched(LogRecord {
        timestamp: caps["timestamp"].trim().to_string(),
        severity: caps["severity"].trim().to_string(),
        vulnerability_type: caps["kind"].trim_matches(['‘', '’']).trim().to_string(),
        url: caps["url"].trim().to_string(),
    })
}

pub fn extract_vulnerabilities<'a, I>(lines: I, options: ExtractOptions) -> ExtractionReport
where
    I: IntoIterator<Item = &'a str>,
{
    let mut report = ExtractionReport::default();

    for (index, line) in lines.into_iter().enumerate() {
        report.lines += 1;
        if !mentions_flagged_severity(line) {
            continue;
        }
        report.candidates += 1;

        let needs_parse = options.mode == OutputMode::Structured
            || options.severity_match == SeverityMatch::Field;
        if !needs_parse {
            report.findings.push(Finding::Raw(line.to_string()));
            continue;
        }

        let record = match parse_line(line) {
            Extraction::Matched(record) => record,
            Extraction::Unmatched(raw) => {
                warn!("Error parsing line {}: {}", index + 1, raw.trim_end());
                report.parse_errors += 1;
                continue;
            }
        };

        if options.severity_match == SeverityMatch::Field && !record.is_flagged() {
            continue;
        }

        report.findings.push(match options.mode {
            OutputMode::Raw => Finding::Raw(line.to_string()),
            OutputMode::Structured => Finding::Record(record),
        });
    }

    report
}
