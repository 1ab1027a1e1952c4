mod archive;
mod extractor;
mod pipeline;

pub use archive::{GZIP_MAGIC, decompress, is_gzip};
pub use extractor::{
    ExtractOptions, ExtractionReport, OutputMode, SeverityMatch, extract_vulnerabilities,
    mentions_flagged_severity, parse_line,
};
pub use pipeline::{CSV_OUTPUT, ExportOptions, RAW_OUTPUT, export_scan_logs};
