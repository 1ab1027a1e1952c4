mod console;
mod export;

pub use console::ConsoleReporter;
pub use export::{CSV_HEADER, CsvExporter, DETAILS_TEXT, RawExporter, write_findings};
