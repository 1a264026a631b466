//! Client configuration

use reqwest::Url;
use std::time::Duration;

use crate::transport::ReconnectConfig;
use crate::{CoreError, Result, DEFAULT_BASE_URL};

/// Path of the server-pushed position stream
pub const LISTENING_PATH: &str = "listening";
/// Path accepting position update requests
pub const UPDATE_PATH: &str = "update";

/// Where the server lives and how to talk to it
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL, with or without trailing slash
    pub base_url: String,

    /// Reconnect policy for the listening stream
    pub reconnect: ReconnectConfig,

    /// Timeout for a single update request. The listening stream has none.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            reconnect: ReconnectConfig::default(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    /// Default settings against another server
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set reconnect policy
    pub fn with_reconnect(mut self, reconnect: ReconnectConfig) -> Self {
        self.reconnect = reconnect;
        self
    }

    /// `GET` endpoint for the position stream
    pub fn listening_url(&self) -> Result<Url> {
        self.endpoint(LISTENING_PATH)
    }

    /// `POST` endpoint for update requests
    pub fn update_url(&self) -> Result<Url> {
        self.endpoint(UPDATE_PATH)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.base_url.trim_end_matches('/');
        if base.is_empty() {
            return Err(CoreError::InvalidUrl("Base URL cannot be empty".to_string()));
        }

        let raw = format!("{}/{}", base, path);
        let url = Url::parse(&raw).map_err(|e| CoreError::InvalidUrl(format!("{}: {}", raw, e)))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(CoreError::InvalidUrl(format!("Unsupported scheme: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let config = ClientConfig::default();
        assert_eq!(
            config.listening_url().unwrap().as_str(),
            "https://websocket-server-6g7i.onrender.com/listening"
        );
        assert_eq!(
            config.update_url().unwrap().as_str(),
            "https://websocket-server-6g7i.onrender.com/update"
        );
        assert_eq!(config.reconnect.delay, Duration::from_millis(3000));
    }

    #[test]
    fn test_trailing_slash_and_path_prefix() {
        let config = ClientConfig::with_base_url("http://127.0.0.1:8080/api/");
        assert_eq!(config.listening_url().unwrap().as_str(), "http://127.0.0.1:8080/api/listening");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            ClientConfig::with_base_url("").update_url(),
            Err(CoreError::InvalidUrl(_))
        ));
        assert!(matches!(
            ClientConfig::with_base_url("not a url").update_url(),
            Err(CoreError::InvalidUrl(_))
        ));
        assert!(matches!(
            ClientConfig::with_base_url("ftp://example.com").update_url(),
            Err(CoreError::InvalidUrl(_))
        ));
    }
}
