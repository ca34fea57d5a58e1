// Device endpoints
//
// Listing is scoped to a home; single-device calls use the global id.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Device, DeviceUpdate};
use crate::range::Paged;

impl ApiClient {
    /// `GET /devices?homeId={home_id}&skip=..&limit=..`
    pub async fn list_devices(
        &self,
        home_id: u64,
        skip: u64,
        limit: u64,
    ) -> Result<Paged<Device>, Error> {
        debug!(home_id, skip, limit, "listing devices");
        self.get_paged(
            "devices",
            &[
                ("homeId", home_id.to_string()),
                ("skip", skip.to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    /// `GET /devices/{id}`
    pub async fn get_device(&self, device_id: u64) -> Result<Device, Error> {
        self.get(&format!("devices/{device_id}")).await
    }

    /// `PATCH /devices/{id}`
    pub async fn update_device(&self, device_id: u64, update: &DeviceUpdate) -> Result<(), Error> {
        debug!(device_id, "updating device");
        self.patch_no_response(&format!("devices/{device_id}"), update)
            .await
    }

    /// `DELETE /devices/{id}`
    pub async fn delete_device(&self, device_id: u64) -> Result<(), Error> {
        debug!(device_id, "deleting device");
        self.delete(&format!("devices/{device_id}")).await
    }
}
