// Smart-module entity endpoints
//
// Entities live under a home's smart-module tree; their ids are only
// unique within that home.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::Entity;

impl ApiClient {
    /// `GET /homes/{home_id}/smartModules/entities[?entityClass=..]`
    pub async fn list_entities(
        &self,
        home_id: u64,
        entity_class: Option<&str>,
    ) -> Result<Vec<Entity>, Error> {
        debug!(home_id, ?entity_class, "listing entities");
        let params: Vec<(&str, String)> = entity_class
            .map(|class| ("entityClass", class.to_owned()))
            .into_iter()
            .collect();
        self.get_with_params(&format!("homes/{home_id}/smartModules/entities"), &params)
            .await
    }

    /// `GET /homes/{home_id}/smartModules/entities/{entity_id}`
    pub async fn get_entity(&self, home_id: u64, entity_id: &str) -> Result<Entity, Error> {
        self.get(&format!("homes/{home_id}/smartModules/entities/{entity_id}"))
            .await
    }

    /// `DELETE /homes/{home_id}/smartModules/entities/{entity_id}`
    pub async fn delete_entity(&self, home_id: u64, entity_id: &str) -> Result<(), Error> {
        debug!(home_id, entity_id, "deleting entity");
        self.delete(&format!("homes/{home_id}/smartModules/entities/{entity_id}"))
            .await
    }
}
