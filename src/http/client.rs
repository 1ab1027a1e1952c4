use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use std::time::Instant;
use tracing::debug;

use crate::config::ClientConfig;
use crate::errors::BrightError;
use crate::models::{ApiRequest, ApiResponse, HttpMethod};

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, BrightError>;
}

pub struct HttpClient {
    client: Client,
    base_url: String,
    authorization: String,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self, BrightError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(false)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            authorization: config.authorization(),
        })
    }

    fn build(&self, request: &ApiRequest) -> RequestBuilder {
        let url = format!("{}{}{}", self.base_url, request.path, request.query_string());
        let method = Self::to_reqwest_method(request.method);

        let mut builder = self
            .client
            .request(method, &url)
            .header("Authorization", &self.authorization)
            .header("Accept", "application/json");

        if request.method.requires_body() {
            if let Some(ref body) = request.body {
                builder = builder.json(body);
            }
        }

        builder
    }

    fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, BrightError> {
        let start = Instant::now();
        let response = self.build(&request).send().await?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let duration_ms = start.elapsed().as_millis() as u64;

        debug!(
            request = %request.display_path(),
            status,
            size = bytes.len(),
            duration_ms,
            "API response"
        );

        let mut info = ApiResponse::new(status, bytes.to_vec());
        info.duration_ms = duration_ms;
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> HttpClient {
        let config = ClientConfig::new("api-key secret", "https://eu.brightsec.com/", 5);
        HttpClient::new(&config).unwrap()
    }

    #[test]
    fn test_request_carries_auth_and_url() {
        let request =
            ApiRequest::get("/api/v2/projects/p1/entry-points").with_query("limit", "500");
        let built = client().build(&request).build().unwrap();

        assert_eq!(built.method(), &Method::GET);
        assert_eq!(
            built.url().as_str(),
            "https://eu.brightsec.com/api/v2/projects/p1/entry-points?limit=500"
        );
        assert_eq!(built.headers()["authorization"], "Api-Key secret");
        assert_eq!(built.headers()["accept"], "application/json");
        assert!(built.body().is_none());
    }

    #[test]
    fn test_post_has_json_body() {
        let request = ApiRequest::post("/api/v1/scans", json!({"name": "s"}));
        let built = client().build(&request).build().unwrap();

        assert_eq!(built.method(), &Method::POST);
        assert_eq!(built.headers()["content-type"], "application/json");
        let body = built.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(body, br#"{"name":"s"}"#);
    }
}
