// ── Normalization contract ──
//
// Every cached resource type says how it is keyed in its entity table
// (namespace + id), what scopes its lists, and which `Action` variant
// carries its slice actions.

use std::fmt;
use std::hash::Hash;

pub use modekit_api::{
    Alert, AlertLevel, Device, DeviceUpdate, Entity, Home, HomeUpdate, ItemRange, KeyValue,
    KvOwner, LoginResponse, NewHome, TimeSeries, User,
};

use crate::store::{Action, SliceAction};

/// Bounds shared by every key component.
pub trait Key: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

impl<T> Key for T where T: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

/// A resource type the cache stores by identity.
///
/// `Namespace` is `()` for globally unique ids and the owning scope for
/// ids that only mean something inside a parent (entities per home,
/// key-value entries per owner).
pub trait Normalized: fmt::Debug + Clone + Send + Sync + 'static {
    type Namespace: Key;
    type Id: Key;
    /// What a list query is filtered by (user, home, owner).
    type Scope: Key;

    /// Human-readable resource name for logs and errors.
    const KIND: &'static str;

    fn id(&self) -> Self::Id;

    /// Wrap a slice action into the root action type.
    fn into_action(action: SliceAction<Self>) -> Action;

    /// Pick this type's slice action out of a root action.
    fn slice_action(action: &Action) -> Option<&SliceAction<Self>>;
}

/// Composite entity-table key.
pub type TableKey<T> = (<T as Normalized>::Namespace, <T as Normalized>::Id);

// ── Resource impls ───────────────────────────────────────────────────

impl Normalized for Home {
    type Namespace = ();
    type Id = u64;
    /// Owning user id.
    type Scope = u64;

    const KIND: &'static str = "home";

    fn id(&self) -> u64 {
        self.id
    }

    fn into_action(action: SliceAction<Self>) -> Action {
        Action::Homes(action)
    }

    fn slice_action(action: &Action) -> Option<&SliceAction<Self>> {
        match action {
            Action::Homes(a) => Some(a),
            _ => None,
        }
    }
}

impl Normalized for Device {
    type Namespace = ();
    type Id = u64;
    /// Home id.
    type Scope = u64;

    const KIND: &'static str = "device";

    fn id(&self) -> u64 {
        self.id
    }

    fn into_action(action: SliceAction<Self>) -> Action {
        Action::Devices(action)
    }

    fn slice_action(action: &Action) -> Option<&SliceAction<Self>> {
        match action {
            Action::Devices(a) => Some(a),
            _ => None,
        }
    }
}

impl Normalized for KeyValue {
    type Namespace = KvOwner;
    type Id = String;
    type Scope = KvOwner;

    const KIND: &'static str = "key-value";

    fn id(&self) -> String {
        self.key.clone()
    }

    fn into_action(action: SliceAction<Self>) -> Action {
        Action::KeyValues(action)
    }

    fn slice_action(action: &Action) -> Option<&SliceAction<Self>> {
        match action {
            Action::KeyValues(a) => Some(a),
            _ => None,
        }
    }
}

impl Normalized for Entity {
    /// Entity ids are only unique within a home.
    type Namespace = u64;
    type Id = String;
    type Scope = u64;

    const KIND: &'static str = "entity";

    fn id(&self) -> String {
        self.id.clone()
    }

    fn into_action(action: SliceAction<Self>) -> Action {
        Action::Entities(action)
    }

    fn slice_action(action: &Action) -> Option<&SliceAction<Self>> {
        match action {
            Action::Entities(a) => Some(a),
            _ => None,
        }
    }
}

impl Normalized for TimeSeries {
    type Namespace = u64;
    type Id = String;
    type Scope = u64;

    const KIND: &'static str = "time series";

    fn id(&self) -> String {
        self.id.clone()
    }

    fn into_action(action: SliceAction<Self>) -> Action {
        Action::TimeSeries(action)
    }

    fn slice_action(action: &Action) -> Option<&SliceAction<Self>> {
        match action {
            Action::TimeSeries(a) => Some(a),
            _ => None,
        }
    }
}

impl Normalized for Alert {
    type Namespace = ();
    type Id = u64;
    type Scope = u64;

    const KIND: &'static str = "alert";

    fn id(&self) -> u64 {
        self.id
    }

    fn into_action(action: SliceAction<Self>) -> Action {
        Action::Alerts(action)
    }

    fn slice_action(action: &Action) -> Option<&SliceAction<Self>> {
        match action {
            Action::Alerts(a) => Some(a),
            _ => None,
        }
    }
}

// ── Test fixtures ────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn home(id: u64, name: &str) -> Home {
        Home {
            id,
            name: name.into(),
            project_id: 1,
            timezone: None,
            creation_time: None,
        }
    }

    pub fn device(id: u64, home_id: u64, name: &str) -> Device {
        Device {
            id,
            project_id: 1,
            home_id: Some(home_id),
            tag: String::new(),
            device_class: "sensor".into(),
            name: name.into(),
            description: String::new(),
            is_connected: true,
            last_connect_time: None,
        }
    }

    pub fn entity(id: &str, class: &str) -> Entity {
        Entity {
            id: id.into(),
            entity_class: class.into(),
            name: None,
            properties: serde_json::Map::new(),
            modification_time: None,
        }
    }

    pub fn kv(key: &str, value: serde_json::Value) -> KeyValue {
        KeyValue {
            key: key.into(),
            value,
            modification_time: None,
        }
    }
}
