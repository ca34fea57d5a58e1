// Home fetches and mutations. Home lists are scoped by owning user.

use tracing::debug;

use super::Fetcher;
use crate::error::CoreError;
use crate::model::{Home, HomeUpdate, NewHome};
use crate::query::Page;

impl Fetcher {
    /// Fetch one page of `user_id`'s homes into the cache.
    pub async fn fetch_homes(&self, user_id: u64, page: Page) -> Result<(), CoreError> {
        let (skip, limit) = page.to_skip_limit();
        debug!(user_id, skip, limit, "fetching homes");
        let paged = self.api.list_homes(user_id, skip, limit).await?;
        self.set_list::<Home>(user_id, page.key(), (), paged.range, paged.items);
        Ok(())
    }

    pub async fn fetch_home(&self, home_id: u64) -> Result<(), CoreError> {
        let home = self.api.get_home(home_id).await?;
        self.set_one((), home);
        Ok(())
    }

    /// Create a home, then invalidate the owner's cached home lists.
    pub async fn create_home(&self, user_id: u64, home: &NewHome) -> Result<Home, CoreError> {
        let created = self.api.create_home(home).await?;
        debug!(user_id, home_id = created.id, "home created");
        self.invalidate::<Home>(user_id);
        Ok(created)
    }

    pub async fn update_home(
        &self,
        user_id: u64,
        home_id: u64,
        update: &HomeUpdate,
    ) -> Result<(), CoreError> {
        self.api.update_home(home_id, update).await?;
        self.invalidate::<Home>(user_id);
        Ok(())
    }

    pub async fn delete_home(&self, user_id: u64, home_id: u64) -> Result<(), CoreError> {
        self.api.delete_home(home_id).await?;
        self.forget::<Home>((), home_id);
        self.invalidate::<Home>(user_id);
        Ok(())
    }
}
