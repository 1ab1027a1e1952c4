use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::analyzer::{ExportOptions, ExtractOptions, OutputMode, SeverityMatch};
use crate::config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::models::{ScanSchedule, ScanSettings, TestSelection};
use crate::ratelimit::DEFAULT_PROJECT_INTERVAL_SECS;
use crate::scanner::{PAGE_SIZE, PaginationOptions};

const DEFAULT_START_IN_MINUTES: i64 = 1;

#[derive(Parser)]
#[command(name = "brightctl")]
#[command(version, about = "Command-line automation for the Bright Security DAST API")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, env = "BRIGHTSEC_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, env = "BRIGHTSEC_BASE_URL", global = true, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    #[arg(long, global = true)]
    pub deadline: Option<u64>,

    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true)]
    pub no_color: bool,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(
            self.api_key.clone().unwrap_or_default(),
            self.base_url.clone(),
            self.timeout,
        )
    }

    pub fn pagination_options(&self) -> PaginationOptions {
        PaginationOptions {
            page_size: PAGE_SIZE,
            deadline: self.deadline.map(Duration::from_secs),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create one or more projects
    CreateProject {
        #[arg(long)]
        name: Vec<String>,

        #[arg(long, env = "PROJECT_FILE")]
        project_file: Option<PathBuf>,

        #[arg(long, env = "GROUP_IDS", value_delimiter = ',')]
        group_ids: Vec<String>,

        #[arg(long, default_value_t = DEFAULT_PROJECT_INTERVAL_SECS)]
        interval_secs: u64,
    },

    /// Start a discovery crawl for a project
    CreateDiscovery {
        #[arg(long, alias = "projectId")]
        project_id: String,

        #[arg(long, alias = "targetUrl")]
        target_url: String,

        #[arg(long, alias = "nameDiscovery")]
        name: String,

        #[arg(long)]
        repeater: Vec<String>,
    },

    /// Start a scan that crawls a target URL
    RunScan {
        #[arg(long, alias = "projectId")]
        project_id: String,

        #[arg(long, alias = "targetUrl")]
        target_url: String,

        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Enumerate untested entry points and scan them
    EpScan {
        #[arg(long)]
        project_id: String,

        #[arg(long)]
        project_name: Option<String>,

        #[arg(long)]
        url_contains: Option<String>,

        #[arg(long)]
        save: Option<PathBuf>,

        #[arg(long)]
        no_dispatch: bool,

        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Scan the entry points listed in a file
    EpScanFile {
        #[arg(long)]
        project_id: String,

        #[arg(long)]
        project_name: Option<String>,

        #[arg(long)]
        entrypoints_file: PathBuf,

        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Download a scan's logs and extract High/Critical findings
    ExportIssues {
        #[arg(long)]
        scan_id: String,

        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        #[arg(long, value_enum, default_value_t = ExportMode::Structured)]
        mode: ExportMode,

        #[arg(long)]
        strict_severity: bool,

        #[arg(long)]
        keep_archive: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportMode {
    Raw,
    Structured,
}

impl ExportMode {
    pub fn export_options(
        self,
        output_dir: PathBuf,
        strict: bool,
        keep_archive: bool,
    ) -> ExportOptions {
        ExportOptions {
            output_dir,
            extract: ExtractOptions {
                mode: match self {
                    ExportMode::Raw => OutputMode::Raw,
                    ExportMode::Structured => OutputMode::Structured,
                },
                severity_match: if strict {
                    SeverityMatch::Field
                } else {
                    SeverityMatch::Substring
                },
            },
            keep_archive,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    #[arg(long = "name", alias = "scan-name", alias = "nameScan")]
    pub name: String,

    #[arg(long, value_delimiter = ',', conflicts_with = "test")]
    pub bucket: Vec<String>,

    #[arg(long, value_delimiter = ',')]
    pub test: Vec<String>,

    #[arg(long, default_value_t = crate::models::DEFAULT_POOL_SIZE)]
    pub pool_size: u32,

    #[arg(long, conflicts_with = "start_in")]
    pub start_at: Option<DateTime<Utc>>,

    #[arg(long)]
    pub start_in: Option<i64>,

    #[arg(long)]
    pub repeater: Vec<String>,
}

impl ScanArgs {
    pub fn settings(&self, default_selection: TestSelection) -> ScanSettings {
        self.build(
            default_selection,
            Some(ScanSchedule::in_minutes(DEFAULT_START_IN_MINUTES)),
        )
    }

    pub fn immediate_settings(&self, default_selection: TestSelection) -> ScanSettings {
        self.build(default_selection, None)
    }

    fn build(
        &self,
        default_selection: TestSelection,
        fallback: Option<ScanSchedule>,
    ) -> ScanSettings {
        let selection = if !self.bucket.is_empty() {
            TestSelection::Buckets(self.bucket.clone())
        } else if !self.test.is_empty() {
            TestSelection::Tests(self.test.clone())
        } else {
            default_selection
        };

        let schedule = match (self.start_at, self.start_in) {
            (Some(at), _) => Some(ScanSchedule::at(at)),
            (None, Some(minutes)) => Some(ScanSchedule::in_minutes(minutes)),
            (None, None) => fallback,
        };

        let mut settings = ScanSettings::new(self.name.clone(), selection);
        settings.schedule = schedule;
        settings.pool_size = self.pool_size;
        settings.repeaters = self.repeater.clone();
        settings
    }
}
