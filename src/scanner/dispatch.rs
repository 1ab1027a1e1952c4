use tracing::{error, info};

use crate::errors::BrightError;
use crate::http::BrightApi;
use crate::models::{DiscoveryRequest, DispatchOutcome, ScanRequest, ScanSettings};

/// An empty ID list sends nothing and returns [`DispatchOutcome::SkippedEmpty`].
pub async fn dispatch_scan(
    api: &BrightApi,
    settings: &ScanSettings,
    project_id: &str,
    project_name: &str,
    entry_point_ids: &[String],
) -> Result<DispatchOutcome, BrightError> {
    if entry_point_ids.is_empty() {
        info!(
            "No entry points found for project {}. Skipping scan.",
            project_name
        );
        return Ok(DispatchOutcome::SkippedEmpty);
    }
    require_project_id(project_id)?;

    let request = ScanRequest::for_entry_points(settings, project_id, entry_point_ids.to_vec());
    info!(
        "Starting scan '{}' for project {} over {} entry points",
        settings.name,
        project_name,
        entry_point_ids.len()
    );

    let scan_id = api.create_scan(&request).await.inspect_err(|e| {
        error!("Scan '{}' was not created: {}", settings.name, e);
    })?;

    match &scan_id {
        Some(id) => info!("Request succeeded with status code 201. Scan ID: {}", id),
        None => info!("Request succeeded with status code 201. No ID found in response"),
    }
    Ok(DispatchOutcome::Started { scan_id })
}

pub async fn start_crawl_scan(
    api: &BrightApi,
    settings: &ScanSettings,
    project_id: &str,
    target_url: &str,
) -> Result<Option<String>, BrightError> {
    require_project_id(project_id)?;
    require_url(target_url)?;

    let request = ScanRequest::for_crawler(settings, project_id, target_url);
    let scan_id = api.create_scan(&request).await?;
    info!(
        "Scan '{}' for project {} started successfully!",
        settings.name, project_id
    );
    Ok(scan_id)
}

pub async fn start_discovery(
    api: &BrightApi,
    project_id: &str,
    discovery: &DiscoveryRequest,
) -> Result<Option<String>, BrightError> {
    require_project_id(project_id)?;
    for url in &discovery.crawler_urls {
        require_url(url)?;
    }

    let discovery_id = api.create_discovery(project_id, discovery).await?;
    info!("Discovery for project {} started successfully!", project_id);
    Ok(discovery_id)
}

fn require_project_id(project_id: &str) -> Result<(), BrightError> {
    if project_id.trim().is_empty() {
        return Err(BrightError::Config("Project ID must not be empty".to_string()));
    }
    Ok(())
}

fn require_url(url: &str) -> Result<(), BrightError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(BrightError::Config(format!(
            "Target URL must start with http:// or https://: '{}'",
            url
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mock::MockTransport;
    use crate::models::{ApiResponse, TestSelection};
    use serde_json::json;

    fn settings() -> ScanSettings {
        ScanSettings::new("weekly", TestSelection::default_buckets())
    }

    #[tokio::test]
    async fn test_empty_ids_skip_without_http() {
        let mock = MockTransport::new();
        let api = BrightApi::new(mock.clone());

        let outcome = dispatch_scan(&api, &settings(), "p1", "shop", &[]).await.unwrap();

        assert_eq!(outcome, DispatchOutcome::SkippedEmpty);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_dispatch_returns_scan_id() {
        let mock = MockTransport::new();
        mock.push_json(201, json!({"id": "scan-42"}));
        let api = BrightApi::new(mock.clone());
        let ids = vec!["e1".to_string(), "e2".to_string()];

        let outcome = dispatch_scan(&api, &settings(), "p1", "shop", &ids).await.unwrap();

        assert_eq!(
            outcome,
            DispatchOutcome::Started {
                scan_id: Some("scan-42".to_string())
            }
        );
        let sent = mock.requests();
        assert_eq!(sent.len(), 1);
        let body = sent[0].body.as_ref().unwrap();
        assert_eq!(body["entryPointIds"], json!(["e1", "e2"]));
        assert_eq!(body["projectId"], "p1");
        assert_eq!(body["name"], "weekly");
    }

    #[tokio::test]
    async fn test_dispatch_failure_carries_body() {
        let mock = MockTransport::new();
        mock.push(ApiResponse::new(400, b"{\"message\":\"bad pool\"}".to_vec()));
        let api = BrightApi::new(mock.clone());

        let result = dispatch_scan(&api, &settings(), "p1", "shop", &["e1".to_string()]).await;

        match result {
            Err(BrightError::Http { status, body }) => {
                assert_eq!(status, 400);
                assert!(body.contains("bad pool"));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_project_id_rejected() {
        let mock = MockTransport::new();
        let api = BrightApi::new(mock.clone());

        let result = dispatch_scan(&api, &settings(), "", "shop", &["e1".to_string()]).await;
        assert!(matches!(result, Err(BrightError::Config(_))));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_crawl_scan_validates_url() {
        let mock = MockTransport::new();
        let api = BrightApi::new(mock.clone());

        let result = start_crawl_scan(&api, &settings(), "p1", "target.example").await;
        assert!(matches!(result, Err(BrightError::Config(_))));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_discovery_posts_to_project() {
        let mock = MockTransport::new();
        mock.push_json(201, json!({"id": "disc-1"}));
        let api = BrightApi::new(mock.clone());

        let discovery = DiscoveryRequest::crawl("crawl", "https://target.example");
        let id = start_discovery(&api, "p7", &discovery).await.unwrap();

        assert_eq!(id.as_deref(), Some("disc-1"));
        assert_eq!(mock.requests()[0].path, "/api/v2/projects/p7/discoveries");
    }
}
