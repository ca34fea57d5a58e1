// Device fetches and mutations. Device lists are scoped by home.

use tracing::debug;

use super::Fetcher;
use crate::error::CoreError;
use crate::model::{Device, DeviceUpdate};
use crate::query::Page;

impl Fetcher {
    /// Fetch one page of the devices in `home_id`.
    pub async fn fetch_devices(&self, home_id: u64, page: Page) -> Result<(), CoreError> {
        let (skip, limit) = page.to_skip_limit();
        debug!(home_id, skip, limit, "fetching devices");
        let paged = self.api.list_devices(home_id, skip, limit).await?;
        self.set_list::<Device>(home_id, page.key(), (), paged.range, paged.items);
        Ok(())
    }

    pub async fn fetch_device(&self, device_id: u64) -> Result<(), CoreError> {
        let device = self.api.get_device(device_id).await?;
        self.set_one((), device);
        Ok(())
    }

    pub async fn update_device(
        &self,
        home_id: u64,
        device_id: u64,
        update: &DeviceUpdate,
    ) -> Result<(), CoreError> {
        self.api.update_device(device_id, update).await?;
        self.invalidate::<Device>(home_id);
        Ok(())
    }

    pub async fn delete_device(&self, home_id: u64, device_id: u64) -> Result<(), CoreError> {
        self.api.delete_device(device_id).await?;
        self.forget::<Device>((), device_id);
        self.invalidate::<Device>(home_id);
        Ok(())
    }
}
