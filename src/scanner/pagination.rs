use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::errors::BrightError;
use crate::http::BrightApi;
use crate::models::{Enumeration, PaginationCursor, PaginationStop};

pub const PAGE_SIZE: usize = 500;

#[derive(Debug, Clone)]
pub struct PaginationOptions {
    pub page_size: usize,
    pub deadline: Option<Duration>,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            deadline: None,
        }
    }
}

/// Untested entry points in creation order. A failed request keeps what was
/// already collected and is reported through [`Enumeration::stop`].
pub async fn fetch_entry_points(
    api: &BrightApi,
    project_id: &str,
    options: &PaginationOptions,
) -> Result<Enumeration, BrightError> {
    if project_id.trim().is_empty() {
        return Err(BrightError::Config("Project ID must not be empty".to_string()));
    }

    let deadline = options.deadline.map(|d| Instant::now() + d);
    let mut entry_points = Vec::new();
    let mut cursor: Option<PaginationCursor> = None;
    let mut pages = 0;
    let mut requests = 0;

    let stop = loop {
        if deadline.is_some_and(|at| Instant::now() >= at) {
            break PaginationStop::DeadlineExceeded;
        }

        info!(
            "Fetching page {} of entry points for project {}",
            pages + 1,
            project_id
        );
        requests += 1;

        let call = api.list_entry_points(project_id, cursor.as_ref(), options.page_size);
        let result = match deadline {
            Some(at) => match tokio::time::timeout_at(at, call).await {
                Ok(result) => result,
                Err(_) => break PaginationStop::DeadlineExceeded,
            },
            None => call.await,
        };

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                error!("Failed to fetch entry points for project {}: {}", project_id, e);
                break PaginationStop::Failed(e);
            }
        };

        let Some(next) = page.next_cursor() else {
            break PaginationStop::Exhausted;
        };

        if cursor.as_ref() == Some(&next) {
            break PaginationStop::Stalled;
        }

        pages += 1;
        let received = page.items.len();
        let before = entry_points.len();
        entry_points.extend(page.items.into_iter().filter(|ep| !ep.is_tested()));
        debug!(
            page = pages,
            received,
            kept = entry_points.len() - before,
            "Entry point page"
        );

        cursor = Some(next);
    };

    let enumeration = Enumeration {
        entry_points,
        pages,
        requests,
        stop,
    };

    if enumeration.is_complete() {
        info!(
            "Fetched {} entry points for project {}.",
            enumeration.entry_points.len(),
            project_id
        );
    } else {
        warn!(
            "Pagination for project {} aborted early after {} pages ({}); keeping {} entry points",
            project_id,
            enumeration.pages,
            enumeration.stop.describe(),
            enumeration.entry_points.len()
        );
    }

    Ok(enumeration)
}
