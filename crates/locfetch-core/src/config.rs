//! Distribution service configuration.
//!
//! The original tooling read the distribution base URL from a module-level
//! constant; here it is an explicit value handed to the HTTP client and the
//! orchestrators, together with the network limits that apply to every
//! request.

use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://dist.example.org/locfetch-prod-dist";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_REDIRECTS: u32 = 5;

/// Remote file name of the per-language wording document.
pub const WORDING_FILE: &str = "Wording.json";
/// Remote file name of the configuration archive.
pub const ARCHIVE_FILE: &str = "Configuration.zip";

#[derive(Debug, Clone)]
pub struct DistConfig {
    pub api_base: String,
    pub proxy: Option<String>,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub max_redirects: u32,
    pub user_agent: String,
}

impl Default for DistConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            proxy: None,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: format!("locfetch/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl DistConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: u32) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// URL of the per-language wording document for one module/version.
    pub fn wording_url(
        &self,
        project: &str,
        country: &str,
        platform: &str,
        version: &str,
        language: &str,
    ) -> String {
        [
            self.api_base.trim_end_matches('/'),
            project,
            country,
            platform,
            version,
            language,
            WORDING_FILE,
        ]
        .join("/")
    }

    /// URL of the configuration archive for one project/version.
    pub fn archive_url(&self, project: &str, country: &str, platform: &str, version: &str) -> String {
        [
            self.api_base.trim_end_matches('/'),
            project,
            country,
            platform,
            version,
            ARCHIVE_FILE,
        ]
        .join("/")
    }
}
