use crate::api::DETECT_TIME_PATH;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Where the detection service lives. An empty `base_url` targets the page's
/// own origin, for deployments that proxy `/api` through the static host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout_ms: Option<u32>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            request_timeout_ms: None,
        }
    }
}

impl ApiConfig {
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim().to_string();
        self
    }

    /// Parses a timeout override; zero or garbage disables the timeout.
    pub fn with_timeout(mut self, raw: &str) -> Self {
        self.request_timeout_ms = raw.trim().parse::<u32>().ok().filter(|ms| *ms > 0);
        self
    }

    pub fn detect_time_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), DETECT_TIME_PATH)
    }
}
