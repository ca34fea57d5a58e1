// Endpoint groups, implemented as inherent methods on `ApiClient`.
//
// Paged list endpoints take raw `skip` / `limit`; translation from
// page number and page size happens in `modekit-core`.

pub mod alerts;
pub mod auth;
pub mod devices;
pub mod entities;
pub mod homes;
pub mod kv;
pub mod series;
