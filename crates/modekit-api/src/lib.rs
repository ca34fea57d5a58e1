// modekit-api: Async Rust client for the MODE device-management REST API

pub mod client;
pub mod error;
pub mod models;
pub mod range;
pub mod resources;
pub mod transport;

pub use client::{ApiClient, RawResponse};
pub use error::Error;
pub use models::{
    Alert, AlertLevel, Device, DeviceUpdate, Entity, Home, HomeUpdate, KeyValue, KvOwner,
    LoginResponse, NewHome, TimeSeries, User,
};
pub use range::{ItemRange, Paged, RANGE_HEADER};
pub use transport::{TlsMode, TransportConfig};
