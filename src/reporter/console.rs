use colored::Colorize;
use tabled::{Table, Tabled, settings::{Style, Modify, object::Rows, Alignment}};

use crate::models::{BatchReport, DispatchOutcome, Enumeration, ExportSummary, Finding};

pub struct ConsoleReporter;

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "Timestamp")]
    timestamp: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Type")]
    vuln_type: String,
    #[tabled(rename = "URL")]
    url: String,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn print_enumeration(&self, project_id: &str, enumeration: &Enumeration) {
        println!("\n{}", "Entry points".bold().underline());
        println!(
            "{} untested entry points in {} pages for project {}",
            enumeration.entry_points.len(),
            enumeration.pages,
            project_id
        );

        if enumeration.is_complete() {
            println!("  {}: {}", "Pagination".green(), enumeration.stop.describe());
        } else {
            println!(
                "  {}: {}",
                "Pagination aborted early".yellow().bold(),
                enumeration.stop.describe()
            );
        }
    }

    pub fn print_dispatch(&self, outcome: &DispatchOutcome) {
        match outcome {
            DispatchOutcome::Started { scan_id: Some(id) } => {
                println!("{} Scan ID: {}", "Scan started.".green().bold(), id.white().bold());
            }
            DispatchOutcome::Started { scan_id: None } => {
                println!("{} No ID found in response", "Scan started.".green().bold());
            }
            DispatchOutcome::SkippedEmpty => {
                println!("{}", "No entry points to scan. Skipping scan.".yellow());
            }
        }
    }

    pub fn print_batch(&self, report: &BatchReport) {
        println!("\n{}", "Summary".bold().underline());
        println!("{} projects processed", report.total());
        println!("  {}: {}", "CREATED".green(), report.created.len());
        if !report.failed.is_empty() {
            println!("  {}: {}", "FAILED".red().bold(), report.failed.len());
            for (name, reason) in &report.failed {
                println!("  → {}: {}", name.yellow(), reason);
            }
        }
        println!();
    }

    pub fn print_export(&self, summary: &ExportSummary) {
        let rows: Vec<RecordRow> = summary
            .findings
            .iter()
            .filter_map(Finding::as_record)
            .map(|r| RecordRow {
                timestamp: r.timestamp.clone(),
                severity: match r.severity.as_str() {
                    "Critical" => "CRITICAL".red().bold().to_string(),
                    "High" => "HIGH".red().to_string(),
                    other => other.to_string(),
                },
                vuln_type: r.vulnerability_type.clone(),
                url: r.url.clone(),
            })
            .collect();

        if !rows.is_empty() {
            let table = Table::new(rows)
                .with(Style::rounded())
                .with(Modify::new(Rows::first()).with(Alignment::center()))
                .to_string();
            println!("\n{}", table);
        }

        println!("\n{}", "Summary".bold().underline());
        println!("{} log lines scanned", summary.lines);
        if summary.matched > 0 {
            println!("  {}: {}", "HIGH/CRITICAL".red().bold(), summary.matched);
        } else {
            println!("  {}", "No High or Critical vulnerabilities found.".green());
        }
        if summary.parse_errors > 0 {
            println!("  {}: {}", "Unparsed lines".yellow(), summary.parse_errors);
        }
        if let Some(ref archive) = summary.archive_path {
            println!("  {}: {}", "Archive".cyan(), archive.display());
        }
        println!("  {}: {}", "Log".cyan(), summary.log_path.display());
        println!("  {}: {}", "Output".cyan(), summary.output_path.display());
        println!();
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
