// Home endpoints
//
// Homes are listed per user and paged through `skip` / `limit`.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Home, HomeUpdate, NewHome};
use crate::range::Paged;

impl ApiClient {
    /// `GET /homes?userId={user_id}&skip=..&limit=..`
    pub async fn list_homes(&self, user_id: u64, skip: u64, limit: u64) -> Result<Paged<Home>, Error> {
        debug!(user_id, skip, limit, "listing homes");
        self.get_paged(
            "homes",
            &[
                ("userId", user_id.to_string()),
                ("skip", skip.to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    /// `GET /homes/{id}`
    pub async fn get_home(&self, home_id: u64) -> Result<Home, Error> {
        self.get(&format!("homes/{home_id}")).await
    }

    /// `POST /homes`, returning the created home.
    pub async fn create_home(&self, home: &NewHome) -> Result<Home, Error> {
        debug!(name = %home.name, "creating home");
        self.post("homes", home).await
    }

    /// `PATCH /homes/{id}`
    pub async fn update_home(&self, home_id: u64, update: &HomeUpdate) -> Result<(), Error> {
        debug!(home_id, "updating home");
        self.patch_no_response(&format!("homes/{home_id}"), update).await
    }

    /// `DELETE /homes/{id}`
    pub async fn delete_home(&self, home_id: u64) -> Result<(), Error> {
        debug!(home_id, "deleting home");
        self.delete(&format!("homes/{home_id}")).await
    }
}
