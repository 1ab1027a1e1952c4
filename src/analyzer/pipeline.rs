use std::fs;
use std::path::PathBuf;

use tracing::info;

use super::archive::decompress;
use super::extractor::{ExtractOptions, OutputMode, extract_vulnerabilities};
use crate::errors::BrightError;
use crate::http::BrightApi;
use crate::models::ExportSummary;
use crate::reporter::write_findings;

pub const CSV_OUTPUT: &str = "filtered_vulnerabilities.csv";
pub const RAW_OUTPUT: &str = "filtered_vulnerabilities.txt";

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output_dir: PathBuf,
    pub extract: ExtractOptions,
    pub keep_archive: bool,
}

impl ExportOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            extract: ExtractOptions::default(),
            keep_archive: false,
        }
    }
}

pub async fn export_scan_logs(
    api: &BrightApi,
    scan_id: &str,
    options: &ExportOptions,
) -> Result<ExportSummary, BrightError> {
    let scan_id = scan_id.trim();
    if scan_id.is_empty() {
        return Err(BrightError::Config("Scan ID must not be empty".to_string()));
    }

    let archive = api.download_log_archive(scan_id).await?;
    info!("Fetched log archive for scan {} ({} bytes)", scan_id, archive.len());

    let decompressed = decompress(&archive)?;

    fs::create_dir_all(&options.output_dir)?;
    let stem = file_stem(scan_id);

    let archive_path = if options.keep_archive {
        let path = options.output_dir.join(format!("{}.log.gz", stem));
        fs::write(&path, &archive)?;
        info!("GZIP file saved to {}", path.display());
        Some(path)
    } else {
        None
    };

    let log_path = options.output_dir.join(format!("{}.log", stem));
    fs::write(&log_path, &decompressed)?;
    info!("Decompressed file saved to {}", log_path.display());

    let text = String::from_utf8_lossy(&decompressed);
    let report = extract_vulnerabilities(text.lines(), options.extract);

    let structured = options.extract.mode == OutputMode::Structured;
    let output_path = options
        .output_dir
        .join(if structured { CSV_OUTPUT } else { RAW_OUTPUT });
    write_findings(&report.findings, structured, &output_path)?;

    if report.has_matches() {
        info!("Filtered vulnerabilities saved to {}", output_path.display());
    } else {
        info!("No High or Critical vulnerabilities found.");
    }

    Ok(ExportSummary {
        archive_path,
        log_path,
        output_path,
        lines: report.lines,
        matched: report.findings.len(),
        parse_errors: report.parse_errors,
        findings: report.findings,
    })
}

fn file_stem(scan_id: &str) -> String {
    scan_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
