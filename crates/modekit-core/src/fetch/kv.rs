// Key-value store fetches and mutations for devices and homes.
//
// Entries are namespaced by owner; the owner is also the list scope.

use tracing::debug;

use super::{Fetcher, Suppress};
use crate::error::CoreError;
use crate::model::{ItemRange, KeyValue, KvOwner};
use crate::query::QueryKey;

impl Fetcher {
    /// Fetch every key-value pair for `owner`.
    ///
    /// Homes without a key-value store answer with an error; pass
    /// `Suppress::With(Vec::new())` to cache an empty store instead.
    pub async fn fetch_key_values(
        &self,
        owner: KvOwner,
        suppress: Suppress<Vec<KeyValue>>,
    ) -> Result<(), CoreError> {
        debug!(%owner, "fetching key-value store");
        let result = self.api.list_key_values(owner).await;
        let items = suppress.resolve("key-value list", result)?;
        let range = ItemRange::whole(items.len());
        self.set_list::<KeyValue>(owner, QueryKey::all(), owner, range, items);
        Ok(())
    }

    pub async fn fetch_key_value(&self, owner: KvOwner, key: &str) -> Result<(), CoreError> {
        let entry = self.api.get_key_value(owner, key).await?;
        self.set_one(owner, entry);
        Ok(())
    }

    /// Write one value, then invalidate the owner's cached key lists.
    pub async fn set_key_value(
        &self,
        owner: KvOwner,
        key: &str,
        value: &serde_json::Value,
    ) -> Result<(), CoreError> {
        self.api.set_key_value(owner, key, value).await?;
        self.invalidate::<KeyValue>(owner);
        Ok(())
    }

    /// Delete one key: drops it from the by-key map and clears the
    /// owner's cached lists.
    pub async fn delete_key_value(&self, owner: KvOwner, key: &str) -> Result<(), CoreError> {
        self.api.delete_key_value(owner, key).await?;
        self.forget::<KeyValue>(owner, key.to_owned());
        self.invalidate::<KeyValue>(owner);
        Ok(())
    }
}
