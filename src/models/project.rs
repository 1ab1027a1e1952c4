use serde::Serialize;

use super::scan::{DEFAULT_POOL_SIZE, Exclusions, MAX_INTERACTIONS_CHAIN_LENGTH};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    pub name: String,
    pub group_ids: Vec<String>,
}

impl ProjectRequest {
    pub fn new(name: impl Into<String>, group_ids: &[String]) -> Self {
        Self {
            name: name.into(),
            group_ids: group_ids.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryRequest {
    pub name: String,
    pub exclusions: Exclusions,
    pub optimized_crawler: bool,
    pub max_interactions_chain_length: u32,
    pub subdomains_crawl: bool,
    pub crawler_urls: Vec<String>,
    pub discovery_types: Vec<String>,
    pub pool_size: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub repeaters: Vec<String>,
}

impl DiscoveryRequest {
    pub fn crawl(name: impl Into<String>, target_url: &str) -> Self {
        Self {
            name: name.into(),
            exclusions: Exclusions::default(),
            optimized_crawler: true,
            max_interactions_chain_length: MAX_INTERACTIONS_CHAIN_LENGTH,
            subdomains_crawl: false,
            crawler_urls: vec![target_url.to_string()],
            discovery_types: vec!["crawler".to_string()],
            pool_size: DEFAULT_POOL_SIZE,
            repeaters: Vec::new(),
        }
    }

    pub fn with_repeaters(mut self, repeaters: Vec<String>) -> Self {
        self.repeaters = repeaters;
        self
    }
}
