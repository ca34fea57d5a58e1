// Session management. The token lives on the shared `ApiClient`; the
// cache is reset whenever the session changes hands.

use secrecy::SecretString;
use tracing::info;

use super::Fetcher;
use crate::error::CoreError;
use crate::model::{LoginResponse, User};
use crate::store::Action;

impl Fetcher {
    /// Log in and start a fresh cache for the new session.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<LoginResponse, CoreError> {
        let session = self.api.login(email, password).await?;
        self.store.dispatch(Action::Reset);
        info!(user_id = session.user_id, "logged in");
        Ok(session)
    }

    /// Revoke the token and drop everything cached under it.
    ///
    /// The client forgets its token even when revocation fails, so the
    /// cache is reset either way before the error is returned.
    pub async fn logout(&self) -> Result<(), CoreError> {
        let result = self.api.logout().await;
        self.store.dispatch(Action::Reset);
        result?;
        info!("logged out");
        Ok(())
    }

    pub async fn user(&self, user_id: u64) -> Result<User, CoreError> {
        Ok(self.api.get_user(user_id).await?)
    }
}
