use indicatif::ProgressBar;
use tracing::{error, info};

use crate::errors::BrightError;
use crate::http::BrightApi;
use crate::models::{BatchReport, ProjectRequest};
use crate::ratelimit::RateLimiter;

pub fn clean_names(names: &[String]) -> Vec<String> {
    names
        .iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect()
}

pub async fn create_projects(
    api: &BrightApi,
    names: &[String],
    group_ids: &[String],
    limiter: &dyn RateLimiter,
    pb: &ProgressBar,
) -> Result<BatchReport, BrightError> {
    if group_ids.is_empty() {
        return Err(BrightError::Config(
            "Group IDs not found. Pass --group-ids or set GROUP_IDS".to_string(),
        ));
    }

    let mut report = BatchReport::default();

    for name in clean_names(names) {
        limiter.acquire().await;
        pb.set_message(name.clone());
        info!("Creating project: {}", name);

        match api.create_project(&ProjectRequest::new(&name, group_ids)).await {
            Ok(_) => {
                info!("Project '{}' created successfully.", name);
                report.created.push(name);
            }
            Err(e) => {
                error!("Failed to create project '{}'. {}", name, e);
                report.failed.push((name, e.to_string()));
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Projects processed");
    Ok(report)
}
