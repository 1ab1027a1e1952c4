use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

pub const DEFAULT_POOL_SIZE: u32 = 10;
pub const MAX_INTERACTIONS_CHAIN_LENGTH: u32 = 3;
pub const TARGET_TIMEOUT_SECS: u32 = 5;

pub const STATIC_ASSET_EXCLUSION: &str = r"(?<excluded_file_ext>(\/\/[^?#]+\.)((?<image>jpg|jpeg|png|gif|svg|eps|webp|tif|tiff|bmp|psd|ai|raw|cr|pcx|tga|ico)|(?<video>mp4|avi|3gp|flv|h264|m4v|mkv|mov|mpg|mpeg|vob|wmv)|(?<audio>wav|mp3|ogg|wma|mid|midi|aif)|(?<document>doc|docx|odt|pdf|rtf|ods|xls|xlsx|odp|ppt|pptx)|(?<font>ttf|otf|fnt|fon))(?:$|#|\?))";
pub const LOGOUT_EXCLUSION: &str = "logout|signout";

pub const DEFAULT_BUCKETS: &[&str] = &[
    "api",
    "business_logic",
    "client_side",
    "cve",
    "legacy",
    "server_side",
];

pub const DEFAULT_TESTS: &[&str] = &[
    "amazon_s3_takeover",
    "jwt",
    "broken_saml_auth",
    "brute_force_login",
    "common_files",
    "cookie_security",
    "csrf",
    "xss",
    "css_injection",
    "default_login_location",
    "directory_listing",
    "email_injection",
    "file_upload",
    "full_path_disclosure",
    "graphql_introspection",
    "header_security",
    "html_injection",
    "http_method_fuzzing",
    "iframe_injection",
    "improper_asset_management",
    "insecure_tls_configuration",
    "ldapi",
    "lfi",
    "nosql",
    "open_cloud_storage",
    "open_database",
    "osi",
    "proto_pollution",
    "rfi",
    "secret_tokens",
    "ssti",
    "server_side_js_injection",
    "ssrf",
    "sqli",
    "stored_xss",
    "unvalidated_redirect",
    "version_control_systems",
    "wordpress",
    "xxe",
    "xpathi",
    "business_constraint_bypass",
    "date_manipulation",
    "excessive_data_exposure",
    "id_enumeration",
    "insecure_output_handling",
    "mass_assignment",
    "prompt_injection",
    "cve_test",
    "retire_js",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestSelection {
    Tests(Vec<String>),
    Buckets(Vec<String>),
}

impl TestSelection {
    pub fn default_tests() -> Self {
        TestSelection::Tests(DEFAULT_TESTS.iter().map(|s| s.to_string()).collect())
    }

    pub fn default_buckets() -> Self {
        TestSelection::Buckets(DEFAULT_BUCKETS.iter().map(|s| s.to_string()).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSchedule {
    #[serde(rename = "type")]
    pub kind: String,
    pub next_run_at: DateTime<Utc>,
}

impl ScanSchedule {
    pub fn at(next_run_at: DateTime<Utc>) -> Self {
        Self {
            kind: "future".to_string(),
            next_run_at,
        }
    }

    pub fn in_minutes(minutes: i64) -> Self {
        Self::at(Utc::now() + Duration::minutes(minutes))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExclusionRule {
    pub patterns: Vec<String>,
    pub methods: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exclusions {
    pub requests: Vec<ExclusionRule>,
}

impl Default for Exclusions {
    fn default() -> Self {
        Self {
            requests: vec![
                ExclusionRule {
                    patterns: vec![STATIC_ASSET_EXCLUSION.to_string()],
                    methods: Vec::new(),
                },
                ExclusionRule {
                    patterns: vec![LOGOUT_EXCLUSION.to_string()],
                    methods: Vec::new(),
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestInfo {
    pub source: String,
}

#[derive(Debug, Clone)]
pub struct ScanSettings {
    pub name: String,
    pub pool_size: u32,
    pub selection: TestSelection,
    pub schedule: Option<ScanSchedule>,
    pub repeaters: Vec<String>,
}

impl ScanSettings {
    pub fn new(name: impl Into<String>, selection: TestSelection) -> Self {
        Self {
            name: name.into(),
            pool_size: DEFAULT_POOL_SIZE,
            selection,
            schedule: None,
            repeaters: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    pub name: String,
    pub pool_size: u32,
    pub smart: bool,
    pub optimized_crawler: bool,
    pub max_interactions_chain_length: u32,
    pub skip_static_params: bool,
    pub target_timeout: u32,
    pub exclusions: Exclusions,
    pub project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_point_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crawler_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discovery_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ScanSchedule>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub repeaters: Vec<String>,
    pub labels: Vec<String>,
    pub attack_param_locations: Vec<String>,
    pub module: String,
    #[serde(flatten)]
    pub selection: TestSelection,
    pub info: RequestInfo,
}

impl ScanRequest {
    fn base(settings: &ScanSettings, project_id: &str) -> Self {
        Self {
            name: settings.name.clone(),
            pool_size: settings.pool_size,
            smart: true,
            optimized_crawler: true,
            max_interactions_chain_length: MAX_INTERACTIONS_CHAIN_LENGTH,
            skip_static_params: true,
            target_timeout: TARGET_TIMEOUT_SECS,
            exclusions: Exclusions::default(),
            project_id: project_id.to_string(),
            entry_point_ids: None,
            crawler_urls: None,
            discovery_types: None,
            schedule: settings.schedule.clone(),
            repeaters: settings.repeaters.clone(),
            labels: Vec::new(),
            attack_param_locations: vec!["query".into(), "fragment".into(), "body".into()],
            module: "dast".to_string(),
            selection: settings.selection.clone(),
            info: RequestInfo {
                source: "api".to_string(),
            },
        }
    }

    pub fn for_entry_points(settings: &ScanSettings, project_id: &str, ids: Vec<String>) -> Self {
        let mut request = Self::base(settings, project_id);
        request.entry_point_ids = Some(ids);
        request
    }

    pub fn for_crawler(settings: &ScanSettings, project_id: &str, target_url: &str) -> Self {
        let mut request = Self::base(settings, project_id);
        request.crawler_urls = Some(vec![target_url.to_string()]);
        request.discovery_types = Some(vec!["crawler".to_string()]);
        request
    }
}
