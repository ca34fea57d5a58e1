// Alert endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::Alert;
use crate::range::Paged;

impl ApiClient {
    /// `GET /homes/{home_id}/alerts?skip=..&limit=..`
    pub async fn list_alerts(&self, home_id: u64, skip: u64, limit: u64) -> Result<Paged<Alert>, Error> {
        debug!(home_id, skip, limit, "listing alerts");
        self.get_paged(
            &format!("homes/{home_id}/alerts"),
            &[("skip", skip.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    /// `DELETE /homes/{home_id}/alerts/{alert_id}`
    pub async fn delete_alert(&self, home_id: u64, alert_id: u64) -> Result<(), Error> {
        debug!(home_id, alert_id, "deleting alert");
        self.delete(&format!("homes/{home_id}/alerts/{alert_id}"))
            .await
    }
}
