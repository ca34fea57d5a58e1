// ── Runtime client configuration ──
//
// Describes *how* to reach the platform. Carries the token and
// connection tuning but never touches disk; the CLI (or any other
// consumer) builds a `ClientConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use modekit_api::{TlsMode, TransportConfig};

/// Public API root used when no URL is configured.
pub const DEFAULT_API_URL: &str = "https://api.tinymode.com/v1";

/// Page size used by list fetches when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: u64 = 25;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed staging deployments).
    DangerAcceptInvalid,
}

/// Configuration for one platform connection.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root (e.g., `https://api.tinymode.com/v1`).
    pub url: Url,
    /// Bearer token; `None` until the user logs in.
    pub token: Option<SecretString>,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    /// Default page size for paged list fetches.
    pub page_size: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            token: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    /// Translate into the api crate's transport settings.
    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            ..TransportConfig::default()
        }
        .with_timeout(self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_mirrors_tls_and_timeout() {
        let config = ClientConfig {
            tls: TlsVerification::DangerAcceptInvalid,
            timeout: Duration::from_secs(5),
            ..ClientConfig::default()
        };
        let transport = config.transport();
        assert_eq!(transport.tls, TlsMode::DangerAcceptInvalid);
        assert_eq!(transport.timeout, Duration::from_secs(5));
    }

    #[test]
    fn default_points_at_public_api() {
        let config = ClientConfig::default();
        assert_eq!(config.url.as_str(), "https://api.tinymode.com/v1");
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.token.is_none());
    }
}
