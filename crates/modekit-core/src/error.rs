// ── Core error types ──
//
// User-facing errors from modekit-core. Consumers never see reqwest
// errors or JSON parse failures directly; the `From<modekit_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the platform at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Not found: {entity_type} {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    /// The platform answered, but without fields the caller relies on.
    #[error("Invalid response from platform: {message}")]
    InvalidResponse { message: String, body: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    Validation { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<modekit_api::Error> for CoreError {
    fn from(err: modekit_api::Error) -> Self {
        match err {
            modekit_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            modekit_api::Error::Unauthorized => CoreError::AuthenticationFailed {
                message: "token missing, expired, or revoked".into(),
            },
            modekit_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            modekit_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            modekit_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            modekit_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            modekit_api::Error::Api {
                status: 404,
                message,
            } => CoreError::NotFound {
                entity_type: "resource".into(),
                identifier: message,
            },
            modekit_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            modekit_api::Error::InvalidResponse { message, body } => {
                CoreError::InvalidResponse { message, body }
            }
            modekit_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_404_becomes_not_found() {
        let err: CoreError = modekit_api::Error::Api {
            status: 404,
            message: "HOME_NOT_FOUND".into(),
        }
        .into();
        assert!(err.is_not_found());
    }

    #[test]
    fn invalid_response_keeps_body() {
        let err: CoreError = modekit_api::Error::InvalidResponse {
            message: "missing token".into(),
            body: "{\"userId\":1}".into(),
        }
        .into();
        assert!(matches!(err, CoreError::InvalidResponse { ref body, .. } if body.contains("userId")));
    }

    #[test]
    fn unauthorized_is_auth_failure() {
        let err: CoreError = modekit_api::Error::Unauthorized.into();
        assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
    }
}
