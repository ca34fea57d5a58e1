// Smart-module entity fetches. Entity ids are unique per home, so the
// home id is both the list scope and the table namespace.

use tracing::debug;

use super::Fetcher;
use crate::error::CoreError;
use crate::model::{Entity, ItemRange};
use crate::query::EntityQuery;

impl Fetcher {
    pub async fn fetch_entities(&self, home_id: u64, query: &EntityQuery) -> Result<(), CoreError> {
        debug!(home_id, class = ?query.entity_class, "fetching entities");
        let items = self
            .api
            .list_entities(home_id, query.entity_class.as_deref())
            .await?;
        let range = ItemRange::whole(items.len());
        self.set_list::<Entity>(home_id, query.key(), home_id, range, items);
        Ok(())
    }

    pub async fn fetch_entity(&self, home_id: u64, entity_id: &str) -> Result<(), CoreError> {
        let entity = self.api.get_entity(home_id, entity_id).await?;
        self.set_one(home_id, entity);
        Ok(())
    }

    pub async fn delete_entity(&self, home_id: u64, entity_id: &str) -> Result<(), CoreError> {
        self.api.delete_entity(home_id, entity_id).await?;
        self.forget::<Entity>(home_id, entity_id.to_owned());
        self.invalidate::<Entity>(home_id);
        Ok(())
    }
}
