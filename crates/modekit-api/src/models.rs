// Wire types for the MODE REST API.
//
// Field names follow the platform's camelCase JSON. Request bodies skip
// absent optionals so PATCH semantics stay partial.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// ── Users / auth ─────────────────────────────────────────────────────

/// Platform user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub creation_time: Option<DateTime<Utc>>,
}

/// Successful login: the bearer token plus the authenticated user id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: u64,
    #[serde(default)]
    pub user: Option<User>,
}

// ── Homes ────────────────────────────────────────────────────────────

/// A home groups devices and smart-module data for one or more users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Home {
    pub id: u64,
    pub name: String,
    pub project_id: u64,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub creation_time: Option<DateTime<Utc>>,
}

/// Body for `POST /homes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHome {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// Body for `PATCH /homes/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

// ── Devices ──────────────────────────────────────────────────────────

/// A provisioned device. Device ids are unique across the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: u64,
    pub project_id: u64,
    #[serde(default)]
    pub home_id: Option<u64>,
    #[serde(default)]
    pub tag: String,
    pub device_class: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_connected: bool,
    #[serde(default)]
    pub last_connect_time: Option<DateTime<Utc>>,
}

/// Body for `PATCH /devices/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ── Key-value store ──────────────────────────────────────────────────

/// Owner of a key-value store: a device or a home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum KvOwner {
    Device(u64),
    Home(u64),
}

impl KvOwner {
    /// Path segment the owner's `kv` collection hangs off.
    pub fn path(&self) -> String {
        match self {
            Self::Device(id) => format!("devices/{id}"),
            Self::Home(id) => format!("homes/{id}"),
        }
    }
}

impl fmt::Display for KvOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Device(id) => write!(f, "device:{id}"),
            Self::Home(id) => write!(f, "home:{id}"),
        }
    }
}

/// One entry of a key-value store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyValue {
    pub key: String,
    pub value: serde_json::Value,
    #[serde(default)]
    pub modification_time: Option<DateTime<Utc>>,
}

// ── Smart-module entities ────────────────────────────────────────────

/// A smart-module entity. Entity ids are unique only within a home.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    #[serde(rename = "entityId")]
    pub id: String,
    pub entity_class: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub properties: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub modification_time: Option<DateTime<Utc>>,
}

// ── Time series ──────────────────────────────────────────────────────

/// Metadata for a time series stored by a home's TSDB smart module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    pub id: String,
    pub home_id: u64,
    #[serde(default)]
    pub module_id: String,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    #[serde(default)]
    pub first_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_timestamp: Option<DateTime<Utc>>,
}

// ── Alerts ───────────────────────────────────────────────────────────

/// Severity of an alert.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AlertLevel {
    #[default]
    Info,
    Warning,
    Critical,
    #[serde(other)]
    Unknown,
}

/// An alert raised for a home, optionally attributed to a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: u64,
    pub home_id: u64,
    #[serde(default)]
    pub device_id: Option<u64>,
    #[serde(default)]
    pub level: AlertLevel,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub creation_time: Option<DateTime<Utc>>,
}
