// Authentication endpoints
//
// `POST /auth/user` exchanges email + password for a bearer token.
// The login payload is validated by hand so a half-formed answer turns
// into `Error::InvalidResponse` with the raw body attached.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{LoginResponse, User};

impl ApiClient {
    /// Authenticate a user and store the returned token on this client.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<LoginResponse, Error> {
        debug!(email, "logging in");
        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });

        let raw: serde_json::Value = match self.post("auth/user", &body).await {
            Ok(raw) => raw,
            Err(Error::Unauthorized) => {
                return Err(Error::Authentication {
                    message: "invalid email or password".into(),
                });
            }
            Err(Error::Api { status, message }) if status == 403 => {
                return Err(Error::Authentication { message });
            }
            Err(e) => return Err(e),
        };

        let login = parse_login(raw)?;
        self.set_token(SecretString::from(login.token.clone()));
        debug!(user_id = login.user_id, "login successful");
        Ok(login)
    }

    /// Revoke the current token and forget it locally.
    pub async fn logout(&self) -> Result<(), Error> {
        debug!("logging out");
        let result = self.delete("auth/user").await;
        self.clear_token();
        result
    }

    /// `GET /users/{id}`
    pub async fn get_user(&self, user_id: u64) -> Result<User, Error> {
        self.get(&format!("users/{user_id}")).await
    }
}

/// Validate a login payload, keeping the raw body when fields are missing.
fn parse_login(raw: serde_json::Value) -> Result<LoginResponse, Error> {
    let has_token = raw
        .get("token")
        .and_then(serde_json::Value::as_str)
        .is_some_and(|t| !t.is_empty());
    let has_user = raw.get("userId").and_then(serde_json::Value::as_u64).is_some();

    if !(has_token && has_user) {
        return Err(Error::InvalidResponse {
            message: "login response is missing token or userId".into(),
            body: raw.to_string(),
        });
    }

    serde_json::from_value(raw.clone()).map_err(|e| Error::InvalidResponse {
        message: e.to_string(),
        body: raw.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn complete_login_parses() {
        let login = parse_login(json!({ "token": "abc", "userId": 42 })).unwrap();
        assert_eq!(login.token, "abc");
        assert_eq!(login.user_id, 42);
        assert!(login.user.is_none());
    }

    #[test]
    fn missing_token_keeps_raw_payload() {
        let err = parse_login(json!({ "userId": 42, "status": "pending" })).unwrap_err();
        match err {
            Error::InvalidResponse { body, .. } => assert!(body.contains("pending")),
            other => panic!("expected InvalidResponse, got {other:?}"),
        }
    }

    #[test]
    fn empty_token_is_invalid() {
        let err = parse_login(json!({ "token": "", "userId": 1 })).unwrap_err();
        assert!(matches!(err, Error::InvalidResponse { .. }));
    }
}
