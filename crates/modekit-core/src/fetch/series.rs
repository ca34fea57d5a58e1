// Time-series metadata from a home's TSDB smart module.
//
// Homes without the module answer with an error, so both fetches accept
// a `Suppress` default.

use tracing::debug;

use super::{Fetcher, Suppress};
use crate::error::CoreError;
use crate::model::{ItemRange, TimeSeries};
use crate::query::QueryKey;

impl Fetcher {
    pub async fn fetch_time_series(
        &self,
        home_id: u64,
        suppress: Suppress<Vec<TimeSeries>>,
    ) -> Result<(), CoreError> {
        debug!(home_id, "fetching time series");
        let result = self.api.list_time_series(home_id).await;
        let items = suppress.resolve("time series list", result)?;
        let range = ItemRange::whole(items.len());
        self.set_list::<TimeSeries>(home_id, QueryKey::all(), home_id, range, items);
        Ok(())
    }

    /// Fetch one series' metadata. A suppressed failure caches `default`
    /// under `series_id`, whatever id the default carries.
    pub async fn fetch_time_series_info(
        &self,
        home_id: u64,
        series_id: &str,
        suppress: Suppress<TimeSeries>,
    ) -> Result<(), CoreError> {
        let info = match self.api.get_time_series(home_id, series_id).await {
            Ok(info) => info,
            Err(err) => {
                let mut fallback = suppress.resolve("time series info", Err(err))?;
                fallback.id = series_id.to_owned();
                fallback
            }
        };
        self.set_one(home_id, info);
        Ok(())
    }
}
