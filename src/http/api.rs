use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use super::Transport;
use crate::errors::BrightError;
use crate::models::{
    ApiRequest, ApiResponse, DiscoveryRequest, EntryPointPage, PaginationCursor, ProjectRequest,
    ScanRequest,
};

#[derive(Clone)]
pub struct BrightApi {
    transport: Arc<dyn Transport>,
}

impl BrightApi {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn entry_points_request(
        project_id: &str,
        cursor: Option<&PaginationCursor>,
        limit: usize,
    ) -> ApiRequest {
        let mut request = ApiRequest::get(format!("/api/v2/projects/{}/entry-points", project_id))
            .with_query("limit", limit.to_string());
        if let Some(c) = cursor {
            request = request
                .with_query("nextId", c.last_id.clone())
                .with_query("nextCreatedAt", c.last_created_at.clone());
        }
        request
    }

    pub async fn list_entry_points(
        &self,
        project_id: &str,
        cursor: Option<&PaginationCursor>,
        limit: usize,
    ) -> Result<EntryPointPage, BrightError> {
        let request = Self::entry_points_request(project_id, cursor, limit);
        let response = self.transport.send(request).await?;
        let response = expect_status(response, 200)?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    pub async fn create_scan(&self, scan: &ScanRequest) -> Result<Option<String>, BrightError> {
        self.create("/api/v1/scans".to_string(), scan).await
    }

    pub async fn create_project(
        &self,
        project: &ProjectRequest,
    ) -> Result<Option<String>, BrightError> {
        self.create("/api/v1/projects".to_string(), project).await
    }

    pub async fn create_discovery(
        &self,
        project_id: &str,
        discovery: &DiscoveryRequest,
    ) -> Result<Option<String>, BrightError> {
        self.create(format!("/api/v2/projects/{}/discoveries", project_id), discovery)
            .await
    }

    pub async fn download_log_archive(&self, scan_id: &str) -> Result<Vec<u8>, BrightError> {
        let request = ApiRequest::get(format!("/api/v1/scans/{}/logs/archive", scan_id));
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(BrightError::from_status(response.status, response.text()));
        }
        Ok(response.body)
    }

    async fn create<T: Serialize>(
        &self,
        path: String,
        payload: &T,
    ) -> Result<Option<String>, BrightError> {
        let body = serde_json::to_value(payload)?;
        let response = self.transport.send(ApiRequest::post(path, body)).await?;
        let response = expect_status(response, 201)?;
        Ok(created_id(&response))
    }
}

fn expect_status(response: ApiResponse, expected: u16) -> Result<ApiResponse, BrightError> {
    if response.status == expected {
        Ok(response)
    } else {
        Err(BrightError::from_status(response.status, response.text()))
    }
}

fn created_id(response: &ApiResponse) -> Option<String> {
    match response.parse_json() {
        Ok(value) => value.get("id").and_then(|v| v.as_str()).map(String::from),
        Err(e) => {
            if !response.body.is_empty() {
                warn!("Created resource but response was not JSON: {}", e);
            }
            None
        }
    }
}
