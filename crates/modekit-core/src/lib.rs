//! Normalized client-side cache for the MODE platform.
//!
//! `modekit-core` sits between [`modekit_api`] (raw HTTP) and consumers
//! such as the CLI. Fetched resources are stored once per identity in
//! per-type entity tables; list fetches record only the ordered ids they
//! returned, keyed by scope and a canonical [`QueryKey`]. Memoized
//! selectors join the two back together.
//!
//! ## Key types
//!
//! - [`Fetcher`]: calls the platform and dispatches results into the
//!   [`Store`]. Mutations invalidate the affected list scope.
//! - [`Store`]: holds the current [`RootState`] snapshot and publishes
//!   each new one to [`StateStream`] subscribers.
//! - [`RootState`] / [`Slice`]: immutable state, updated by the pure
//!   [`RootState::reduce`].
//! - [`ListSelector`] / [`ScopeSelector`]: memoized denormalizing reads.
//! - [`CoreError`]: user-facing error type.

pub mod config;
pub mod error;
pub mod fetch;
pub mod model;
pub mod query;
pub mod select;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ClientConfig, TlsVerification};
pub use error::CoreError;
pub use fetch::{Fetcher, Suppress};
pub use query::{EntityQuery, Page, QueryKey};
pub use select::{List, ListSelector, ScopeSelector, Selectors};
pub use store::{Action, EntityTable, QueryIndex, ResultSet, RootState, Slice, SliceAction, Store};
pub use stream::{StateStream, StateWatchStream};

// ── Model re-exports ────────────────────────────────────────────────
pub use model::{
    Alert, AlertLevel, Device, DeviceUpdate, Entity, Home, HomeUpdate, ItemRange, KeyValue,
    KvOwner, LoginResponse, NewHome, Normalized, TimeSeries, User,
};
