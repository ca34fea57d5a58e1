// ── Fetch orchestration ──
//
// Calls the platform, translates pagination, and dispatches the results
// into the Store. Mutations never patch cached lists in place: after a
// successful call they invalidate the affected scope so the next read
// refetches.

mod alerts;
mod auth;
mod devices;
mod entities;
mod homes;
mod kv;
mod series;

use std::sync::Arc;

use secrecy::SecretString;
use tracing::{debug, warn};

use modekit_api::ApiClient;

use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::model::{ItemRange, Normalized};
use crate::query::QueryKey;
use crate::store::{RootState, SliceAction, Store};

/// What to do when an optional fetch fails.
///
/// Some sub-resources simply don't exist for every home (a home without
/// the TSDB module has no time series). `With` substitutes a default
/// value, logs the failure, and reports success.
#[derive(Debug, Clone)]
pub enum Suppress<T> {
    Never,
    With(T),
}

impl<T> Suppress<T> {
    fn resolve(self, what: &str, result: Result<T, modekit_api::Error>) -> Result<T, CoreError> {
        match (result, self) {
            (Ok(value), _) => Ok(value),
            (Err(err), Suppress::With(default)) => {
                warn!(error = %err, "{what} failed; using default");
                Ok(default)
            }
            (Err(err), Suppress::Never) => Err(err.into()),
        }
    }
}

/// Fetches resources and keeps the Store in sync with the platform.
#[derive(Clone)]
pub struct Fetcher {
    api: Arc<ApiClient>,
    store: Arc<Store>,
    page_size: u64,
}

impl Fetcher {
    pub fn new(api: Arc<ApiClient>, store: Arc<Store>) -> Self {
        Self {
            api,
            store,
            page_size: crate::config::DEFAULT_PAGE_SIZE,
        }
    }

    /// Build the HTTP client from `config` with an empty Store.
    pub fn from_config(config: &ClientConfig) -> Result<Self, CoreError> {
        let api = ApiClient::new(config.url.as_str(), &config.transport())?;
        if let Some(token) = &config.token {
            api.set_token(token.clone());
        }
        debug!(url = %config.url, "fetcher ready");
        Ok(Self {
            api: Arc::new(api),
            store: Arc::new(Store::new()),
            page_size: config.page_size,
        })
    }

    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// Shorthand for `store().state()`.
    pub fn state(&self) -> Arc<RootState> {
        self.store.state()
    }

    /// Page size applied by callers that don't choose one.
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn set_token(&self, token: SecretString) {
        self.api.set_token(token);
    }

    // ── Dispatch helpers ─────────────────────────────────────────────

    fn set_list<T: Normalized>(
        &self,
        scope: T::Scope,
        query: QueryKey,
        namespace: T::Namespace,
        range: ItemRange,
        items: Vec<T>,
    ) {
        debug!(kind = T::KIND, ?scope, %query, count = items.len(), "caching list");
        self.store
            .dispatch(SliceAction::set_list(scope, query, namespace, range, items));
    }

    fn set_one<T: Normalized>(&self, namespace: T::Namespace, entity: T) {
        self.store.dispatch(SliceAction::set_one(namespace, entity));
    }

    fn invalidate<T: Normalized>(&self, scope: T::Scope) {
        debug!(kind = T::KIND, ?scope, "invalidating lists");
        self.store.dispatch(SliceAction::<T>::clear_lists(scope));
    }

    fn forget<T: Normalized>(&self, namespace: T::Namespace, id: T::Id) {
        self.store.dispatch(SliceAction::<T>::remove(namespace, id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suppress_substitutes_default_on_error() {
        let value = Suppress::With(7).resolve("lookup", Err(modekit_api::Error::Unauthorized));
        assert!(matches!(value, Ok(7)));
    }

    #[test]
    fn suppress_never_propagates() {
        let value = Suppress::<u8>::Never.resolve("lookup", Err(modekit_api::Error::Unauthorized));
        assert!(matches!(value, Err(CoreError::AuthenticationFailed { .. })));
    }

    #[test]
    fn success_ignores_default() {
        let value = Suppress::With(7).resolve("lookup", Ok(1));
        assert!(matches!(value, Ok(1)));
    }
}
