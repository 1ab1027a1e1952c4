use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::BrightError;
use crate::models::{Finding, LogRecord};

pub const CSV_HEADER: [&str; 5] = ["Timestamp", "Severity", "Type", "Details", "URL"];
pub const DETAILS_TEXT: &str = "Vulnerability found";

pub struct CsvExporter;

impl CsvExporter {
    pub fn export(records: &[&LogRecord], path: &Path) -> Result<(), BrightError> {
        let mut writer = BufWriter::new(File::create(path)?);
        Self::write_row(&mut writer, &CSV_HEADER)?;
        for record in records {
            Self::write_row(
                &mut writer,
                &[
                    record.timestamp.as_str(),
                    record.severity.as_str(),
                    record.vulnerability_type.as_str(),
                    DETAILS_TEXT,
                    record.url.as_str(),
                ],
            )?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_row<W: Write>(writer: &mut W, fields: &[&str]) -> Result<(), BrightError> {
        let row: Vec<String> = fields.iter().map(|f| Self::escape(f)).collect();
        write!(writer, "{}\r\n", row.join(","))?;
        Ok(())
    }

    fn escape(field: &str) -> String {
        if field.contains([',', '"', '\r', '\n']) {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }
}

pub struct RawExporter;

impl RawExporter {
    pub fn export(lines: &[&str], path: &Path) -> Result<(), BrightError> {
        let mut writer = BufWriter::new(File::create(path)?);
        for line in lines {
            writeln!(writer, "{}", line.trim_end_matches(['\r', '\n']))?;
        }
        writer.flush()?;
        Ok(())
    }
}

pub fn write_findings(
    findings: &[Finding],
    structured: bool,
    path: &Path,
) -> Result<(), BrightError> {
    if structured {
        let records: Vec<&LogRecord> = findings.iter().filter_map(Finding::as_record).collect();
        CsvExporter::export(&records, path)
    } else {
        let lines: Vec<&str> = findings
            .iter()
            .filter_map(|f| match f {
                Finding::Raw(line) => Some(line.as_str()),
                Finding::Record(_) => None,
            })
            .collect();
        RawExporter::export(&lines, path)
    }
}
