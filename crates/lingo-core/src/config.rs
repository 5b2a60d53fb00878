//! Client configuration.
//!
//! `ClientConfig` carries the endpoints and limits a session runs with. The
//! constant sub-modules hold the fixed protocol values.

use std::time::Duration;

/// Fixed request identity.
pub mod http {
    use std::time::Duration;

    /// User agent sent with every request.
    pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
        (KHTML, like Gecko) Chrome/83.0.4103.116 Safari/537.36";

    /// Cookie the credential is stored under.
    pub const JWT_COOKIE_NAME: &str = "jwt_token";

    /// Default global timeout for a single request.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Largest response body read. Legacy profiles of long-time learners
    /// exceed the HTTP client's 10 MB default.
    pub const MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;
}

/// Endpoint roots.
pub mod endpoints {
    pub const DEFAULT_API_BASE: &str = "https://www.duolingo.com";
    pub const DEFAULT_LEGACY_BASE: &str = "https://www.duolingo.com";

    /// Versioned path segment of the JSON API.
    pub const API_VERSION: &str = "2017-06-30";
}

/// Vocabulary pagination limits.
pub mod pagination {
    /// Upper bound on learned-lexeme page requests for one walk.
    pub const MAX_PAGES: usize = 500;
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root of the versioned JSON API (`{api_base}/2017-06-30/...`).
    pub api_base: String,
    /// Root of the legacy endpoints (`/users/{username}`, `/switch_language`).
    pub legacy_base: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub max_body_bytes: u64,
    pub max_pages: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: endpoints::DEFAULT_API_BASE.to_string(),
            legacy_base: endpoints::DEFAULT_LEGACY_BASE.to_string(),
            user_agent: http::USER_AGENT.to_string(),
            timeout: http::DEFAULT_TIMEOUT,
            max_body_bytes: http::MAX_BODY_BYTES,
            max_pages: pagination::MAX_PAGES,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point both endpoint roots at the same host.
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        self.legacy_base = base.clone();
        self.api_base = base;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: u64) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// `{api_base}/2017-06-30/users/{id}`, optionally with a `fields` selector.
    pub fn user_by_id_url(&self, id: &str, fields: &[&str]) -> String {
        let mut url = format!("{}/{}/users/{}", self.api_base, endpoints::API_VERSION, id);
        if !fields.is_empty() {
            url.push_str("?fields=");
            url.push_str(&fields.join(","));
        }
        url
    }

    pub fn user_by_name_url(&self, username: &str) -> String {
        format!("{}/users/{}", self.legacy_base, username)
    }

    pub fn switch_language_url(&self) -> String {
        format!("{}/switch_language", self.legacy_base)
    }

    pub fn following_url(&self, id: u64) -> String {
        format!(
            "{}/{}/friends/users/{}/following",
            self.api_base,
            endpoints::API_VERSION,
            id
        )
    }

    pub fn learned_lexemes_url(
        &self,
        id: u64,
        learning: &str,
        source: &str,
        start_index: usize,
    ) -> String {
        format!(
            "{}/{}/users/{}/courses/{}/{}/learned-lexemes?sortBy=ALPHABETICAL&startIndex={}",
            self.api_base,
            endpoints::API_VERSION,
            id,
            learning,
            source,
            start_index
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base, "https://www.duolingo.com");
        assert_eq!(config.timeout.as_secs(), 30);
        assert_eq!(config.max_pages, 500);
        assert_eq!(config.max_body_bytes, 64 * 1024 * 1024);
        assert_eq!(config.with_max_body_bytes(1024).max_body_bytes, 1024);
    }

    #[test]
    fn test_user_by_id_url_fields() {
        let config = ClientConfig::new().with_base_url("http://mock/");
        assert_eq!(
            config.user_by_id_url("42", &["xpGoal", "xpGains"]),
            "http://mock/2017-06-30/users/42?fields=xpGoal,xpGains"
        );
        assert_eq!(
            config.user_by_id_url("42", &[]),
            "http://mock/2017-06-30/users/42"
        );
    }

    #[test]
    fn test_learned_lexemes_url() {
        let config = ClientConfig::new().with_base_url("http://mock");
        assert_eq!(
            config.learned_lexemes_url(7, "hv", "en", 20),
            "http://mock/2017-06-30/users/7/courses/hv/en/learned-lexemes?sortBy=ALPHABETICAL&startIndex=20"
        );
    }
}
