mod entry_point;
mod log_record;
mod project;
mod request;
mod result;
mod scan;

pub use entry_point::{EntryPoint, EntryPointPage, PaginationCursor, TESTED_STATUS};
pub use log_record::{Extraction, FLAGGED_SEVERITIES, Finding, LogRecord};
pub use project::{DiscoveryRequest, ProjectRequest};
pub use request::{ApiRequest, ApiResponse, HttpMethod};
pub use result::{BatchReport, DispatchOutcome, Enumeration, ExportSummary, Outcome, PaginationStop};
pub use scan::{
    DEFAULT_BUCKETS, DEFAULT_POOL_SIZE, DEFAULT_TESTS, Exclusions, ScanRequest, ScanSchedule,
    ScanSettings, TestSelection,
};
