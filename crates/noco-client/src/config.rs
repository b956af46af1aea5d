//! Connection configuration.

/// Connection parameters for a NocoDB deployment.
///
/// Built once at startup and immutable for the process lifetime. All three
/// values are required; the bootstrap layer refuses to start without them.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Service base URL without a trailing slash.
    pub base_url: String,
    /// The base (workspace) holding the tables.
    pub base_id: String,
    /// API token sent with every request.
    pub api_token: String,
}

impl ConnectionConfig {
    /// Create a config, normalizing the base URL by trimming trailing
    /// slashes so that paths can be appended directly.
    pub fn new(
        base_url: impl Into<String>,
        base_id: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            base_id: base_id.into(),
            api_token: api_token.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash() {
        let config = ConnectionConfig::new("https://app.nocodb.com/", "b1", "t1");
        assert_eq!(config.base_url, "https://app.nocodb.com");
    }

    #[test]
    fn keeps_clean_url_unchanged() {
        let config = ConnectionConfig::new("http://localhost:8080", "b1", "t1");
        assert_eq!(config.base_url, "http://localhost:8080");
    }
}
