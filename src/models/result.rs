use std::path::PathBuf;

use super::{EntryPoint, Finding};
use crate::errors::{BrightError, EXIT_FAILED, EXIT_NOTHING_TO_DO, EXIT_OK, EXIT_PARTIAL};

#[derive(Debug)]
pub enum PaginationStop {
    Exhausted,
    Failed(BrightError),
    DeadlineExceeded,
    Stalled,
}

impl PaginationStop {
    pub fn describe(&self) -> String {
        match self {
            PaginationStop::Exhausted => "all pages fetched".to_string(),
            PaginationStop::Failed(e) => format!("request failed: {}", e),
            PaginationStop::DeadlineExceeded => "deadline exceeded".to_string(),
            PaginationStop::Stalled => "cursor did not advance".to_string(),
        }
    }
}

#[derive(Debug)]
pub struct Enumeration {
    pub entry_points: Vec<EntryPoint>,
    pub pages: usize,
    pub requests: usize,
    pub stop: PaginationStop,
}

impl Enumeration {
    pub fn is_complete(&self) -> bool {
        matches!(self.stop, PaginationStop::Exhausted)
    }

    pub fn ids(&self) -> Vec<String> {
        self.entry_points.iter().map(|ep| ep.id.clone()).collect()
    }

    /// Keeps partial listings, but a listing that failed before its first page
    /// becomes that failure.
    pub fn require_first_page(self) -> Result<Self, BrightError> {
        match self {
            Enumeration {
                pages: 0,
                stop: PaginationStop::Failed(e),
                ..
            } => Err(e),
            enumeration => Ok(enumeration),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Started { scan_id: Option<String> },
    SkippedEmpty,
}

impl DispatchOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, DispatchOutcome::Started { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub created: Vec<String>,
    pub failed: Vec<(String, String)>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.created.len() + self.failed.len()
    }
}

#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub archive_path: Option<PathBuf>,
    pub log_path: PathBuf,
    pub output_path: PathBuf,
    pub lines: usize,
    pub matched: usize,
    pub parse_errors: usize,
    pub findings: Vec<Finding>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    NothingToDo,
    Partial,
    Failed,
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Done => EXIT_OK,
            Outcome::NothingToDo => EXIT_NOTHING_TO_DO,
            Outcome::Partial => EXIT_PARTIAL,
            Outcome::Failed => EXIT_FAILED,
        }
    }

    pub fn from_listing(listing_complete: bool, selected: usize) -> Self {
        match (listing_complete, selected) {
            (false, _) => Outcome::Partial,
            (true, 0) => Outcome::NothingToDo,
            (true, _) => Outcome::Done,
        }
    }

    pub fn from_dispatch(listing_complete: bool, dispatch: &DispatchOutcome) -> Self {
        match (listing_complete, dispatch) {
            (false, _) => Outcome::Partial,
            (true, DispatchOutcome::SkippedEmpty) => Outcome::NothingToDo,
            (true, DispatchOutcome::Started { .. }) => Outcome::Done,
        }
    }

    pub fn from_batch(report: &BatchReport) -> Self {
        match (report.created.is_empty(), report.failed.is_empty()) {
            (_, true) if report.total() == 0 => Outcome::NothingToDo,
            (_, true) => Outcome::Done,
            (false, false) => Outcome::Partial,
            (true, false) => Outcome::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_codes_are_distinct() {
        let codes = [
            Outcome::Done.exit_code(),
            Outcome::NothingToDo.exit_code(),
            Outcome::Partial.exit_code(),
            Outcome::Failed.exit_code(),
            BrightError::Config(String::new()).exit_code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_dispatch_outcomes() {
        let started = DispatchOutcome::Started { scan_id: None };
        let skipped = DispatchOutcome::SkippedEmpty;
        assert_eq!(Outcome::from_dispatch(true, &started), Outcome::Done);
        assert_eq!(Outcome::from_dispatch(true, &skipped), Outcome::NothingToDo);
        assert_eq!(Outcome::from_dispatch(false, &started), Outcome::Partial);
        assert_eq!(Outcome::from_dispatch(false, &skipped), Outcome::Partial);
    }

    #[test]
    fn test_batch_outcomes() {
        let mut report = BatchReport::default();
        assert_eq!(Outcome::from_batch(&report), Outcome::NothingToDo);

        report.created.push("a".into());
        assert_eq!(Outcome::from_batch(&report), Outcome::Done);

        report.failed.push(("b".into(), "409".into()));
        assert_eq!(Outcome::from_batch(&report), Outcome::Partial);

        report.created.clear();
        assert_eq!(Outcome::from_batch(&report), Outcome::Failed);
    }

    #[test]
    fn test_listing_outcomes() {
        assert_eq!(Outcome::from_listing(true, 3), Outcome::Done);
        assert_eq!(Outcome::from_listing(true, 0), Outcome::NothingToDo);
        assert_eq!(Outcome::from_listing(false, 3), Outcome::Partial);
    }

    fn failed_listing(pages: usize, error: BrightError) -> Enumeration {
        Enumeration {
            entry_points: Vec::new(),
            pages,
            requests: pages + 1,
            stop: PaginationStop::Failed(error),
        }
    }

    #[test]
    fn test_failure_on_first_page_is_an_error() {
        let listing = failed_listing(0, BrightError::from_status(401, "bad key".into()));
        match listing.require_first_page() {
            Err(e) => assert_eq!(e.exit_code(), crate::errors::EXIT_AUTH),
            Ok(_) => panic!("expected the first page failure"),
        }
    }

    #[test]
    fn test_failure_after_first_page_is_kept_as_partial() {
        let listing = failed_listing(2, BrightError::Network("reset".into()));
        let listing = listing.require_first_page().unwrap();
        assert_eq!(listing.pages, 2);
        assert!(!listing.is_complete());

        let empty = Enumeration {
            entry_points: Vec::new(),
            pages: 0,
            requests: 1,
            stop: PaginationStop::Exhausted,
        };
        assert!(empty.require_first_page().unwrap().is_complete());
    }

    #[test]
    fn test_enumeration_completeness() {
        let complete = Enumeration {
            entry_points: Vec::new(),
            pages: 0,
            requests: 1,
            stop: PaginationStop::Exhausted,
        };
        assert!(complete.is_complete());

        let partial = Enumeration {
            stop: PaginationStop::Failed(BrightError::Http {
                status: 500,
                body: String::new(),
            }),
            ..complete
        };
        assert!(!partial.is_complete());
        assert!(partial.stop.describe().contains("500"));
    }
}
