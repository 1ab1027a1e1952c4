pub mod analyzer;
pub mod cli;
pub mod config;
pub mod errors;
pub mod http;
pub mod models;
pub mod ratelimit;
pub mod reporter;
pub mod scanner;

pub use analyzer::{ExportOptions, ExtractOptions, OutputMode, SeverityMatch};
pub use config::ClientConfig;
pub use errors::BrightError;
pub use http::{BrightApi, HttpClient, Transport};
pub use models::{
    DispatchOutcome, EntryPoint, Enumeration, LogRecord, Outcome, ScanSettings, TestSelection,
};
pub use ratelimit::{FixedInterval, RateLimiter, Unthrottled};
pub use reporter::ConsoleReporter;
pub use scanner::PaginationOptions;
