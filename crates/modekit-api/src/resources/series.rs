// Time-series (TSDB smart module) endpoints
//
// A home without the TSDB module answers 404 here; callers that treat
// that as "not configured" decide how to handle it.

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::TimeSeries;

impl ApiClient {
    /// `GET /homes/{home_id}/smartModules/tsdb/timeSeries`
    pub async fn list_time_series(&self, home_id: u64) -> Result<Vec<TimeSeries>, Error> {
        self.get(&format!("homes/{home_id}/smartModules/tsdb/timeSeries"))
            .await
    }

    /// `GET /homes/{home_id}/smartModules/tsdb/timeSeries/{series_id}`
    pub async fn get_time_series(&self, home_id: u64, series_id: &str) -> Result<TimeSeries, Error> {
        self.get(&format!(
            "homes/{home_id}/smartModules/tsdb/timeSeries/{series_id}"
        ))
        .await
    }
}
