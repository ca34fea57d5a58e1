// ── Normalized cache state ──
//
// Entity tables, query indexes, per-resource slices, the pure root
// reducer, and the `Store` that publishes snapshots.

mod action;
mod data_store;
mod entity_table;
mod query_index;
mod slice;
mod state;

pub use action::{Action, SliceAction};
pub use data_store::Store;
pub use entity_table::EntityTable;
pub use query_index::{QueryIndex, ResultSet};
pub use slice::Slice;
pub use state::RootState;

pub(crate) use entity_table::Rows;
pub(crate) use query_index::Entries;
