// Alert fetches. Alerts are paged and scoped by home.

use tracing::debug;

use super::Fetcher;
use crate::error::CoreError;
use crate::model::Alert;
use crate::query::Page;

impl Fetcher {
    pub async fn fetch_alerts(&self, home_id: u64, page: Page) -> Result<(), CoreError> {
        let (skip, limit) = page.to_skip_limit();
        debug!(home_id, skip, limit, "fetching alerts");
        let paged = self.api.list_alerts(home_id, skip, limit).await?;
        self.set_list::<Alert>(home_id, page.key(), (), paged.range, paged.items);
        Ok(())
    }

    /// Dismiss an alert.
    pub async fn delete_alert(&self, home_id: u64, alert_id: u64) -> Result<(), CoreError> {
        self.api.delete_alert(home_id, alert_id).await?;
        self.forget::<Alert>((), alert_id);
        self.invalidate::<Alert>(home_id);
        Ok(())
    }
}
