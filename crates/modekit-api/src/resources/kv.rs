// Key-value store endpoints
//
// Devices and homes each own a key-value store at `{owner}/kv`.
// Keys are unique per owner.

use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{KeyValue, KvOwner};

impl ApiClient {
    /// `GET /{owner}/kv`
    pub async fn list_key_values(&self, owner: KvOwner) -> Result<Vec<KeyValue>, Error> {
        debug!(%owner, "listing key-value pairs");
        self.get(&format!("{}/kv", owner.path())).await
    }

    /// `GET /{owner}/kv/{key}`
    pub async fn get_key_value(&self, owner: KvOwner, key: &str) -> Result<KeyValue, Error> {
        self.get(&format!("{}/kv/{}", owner.path(), encode_key(key)))
            .await
    }

    /// `PUT /{owner}/kv/{key}` with `{"value": ...}`
    pub async fn set_key_value(
        &self,
        owner: KvOwner,
        key: &str,
        value: &serde_json::Value,
    ) -> Result<(), Error> {
        debug!(%owner, key, "setting key-value pair");
        self.put_no_response(
            &format!("{}/kv/{}", owner.path(), encode_key(key)),
            &json!({ "value": value }),
        )
        .await
    }

    /// `DELETE /{owner}/kv/{key}`
    pub async fn delete_key_value(&self, owner: KvOwner, key: &str) -> Result<(), Error> {
        debug!(%owner, key, "deleting key-value pair");
        self.delete(&format!("{}/kv/{}", owner.path(), encode_key(key)))
            .await
    }
}

/// Percent-encode a key for use as a single path segment.
fn encode_key(key: &str) -> String {
    url::form_urlencoded::byte_serialize(key.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_single_segments() {
        assert_eq!(encode_key("plain"), "plain");
        assert_eq!(encode_key("a/b c"), "a%2Fb%20c");
    }
}
