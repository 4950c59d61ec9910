//! Portal client configuration loaded from environment variables.

/// Connection settings for the LG portal backend.
///
/// All fields have defaults suitable for local development. In
/// production, override via environment variables.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Base URL of the portal API, without a trailing slash.
    pub base_url: String,
    /// Bearer token attached to every request when set.
    pub bearer_token: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl PortalConfig {
    /// Configuration for a given base URL with default timeout and no
    /// token.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: trim_trailing_slash(base_url.into()),
            bearer_token: None,
            request_timeout_secs: 30,
        }
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                  |
    /// |--------------------------|--------------------------|
    /// | `LG_PORTAL_URL`          | `http://localhost:8000`  |
    /// | `LG_PORTAL_TOKEN`        | unset                    |
    /// | `LG_PORTAL_TIMEOUT_SECS` | `30`                     |
    pub fn from_env() -> Self {
        let base_url = std::env::var("LG_PORTAL_URL")
            .unwrap_or_else(|_| "http://localhost:8000".into());

        let bearer_token = std::env::var("LG_PORTAL_TOKEN").ok().filter(|t| !t.is_empty());

        let request_timeout_secs: u64 = std::env::var("LG_PORTAL_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("LG_PORTAL_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url: trim_trailing_slash(base_url),
            bearer_token,
            request_timeout_secs,
        }
    }

    /// Attach a bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_trailing_slash() {
        let config = PortalConfig::new("http://portal.example/");
        assert_eq!(config.base_url, "http://portal.example");
    }

    #[test]
    fn new_keeps_clean_url() {
        let config = PortalConfig::new("http://portal.example");
        assert_eq!(config.base_url, "http://portal.example");
    }

    #[test]
    fn with_token_sets_bearer() {
        let config = PortalConfig::new("http://portal.example").with_token("abc");
        assert_eq!(config.bearer_token.as_deref(), Some("abc"));
    }

    #[test]
    fn default_timeout_is_thirty_seconds() {
        let config = PortalConfig::new("http://portal.example");
        assert_eq!(config.request_timeout_secs, 30);
    }
}
