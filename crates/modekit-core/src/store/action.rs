// ── Actions ──
//
// Every state change goes through an `Action`. Each resource type has
// its own slice action vocabulary; the root enum tags which slice the
// action belongs to.

use strum::IntoStaticStr;

use crate::model::{
    Alert, Device, Entity, Home, ItemRange, KeyValue, Normalized, TimeSeries,
};
use crate::query::QueryKey;

/// A change to one resource slice.
#[derive(Debug, Clone, PartialEq)]
pub enum SliceAction<T: Normalized> {
    /// A list fetch completed: upsert `items` and record their ids.
    SetList {
        scope: T::Scope,
        query: QueryKey,
        namespace: T::Namespace,
        range: ItemRange,
        items: Vec<T>,
    },
    /// A single-entity fetch completed.
    SetOne { namespace: T::Namespace, entity: T },
    /// The entity was deleted upstream.
    Remove { namespace: T::Namespace, id: T::Id },
    /// Invalidate every cached list in `scope`.
    ClearLists { scope: T::Scope },
    /// Drop every cached entity in `namespace`.
    ClearNamespace { namespace: T::Namespace },
}

impl<T: Normalized> SliceAction<T> {
    pub fn set_list(
        scope: T::Scope,
        query: QueryKey,
        namespace: T::Namespace,
        range: ItemRange,
        items: Vec<T>,
    ) -> Self {
        Self::SetList {
            scope,
            query,
            namespace,
            range,
            items,
        }
    }

    pub fn set_one(namespace: T::Namespace, entity: T) -> Self {
        Self::SetOne { namespace, entity }
    }

    pub fn remove(namespace: T::Namespace, id: T::Id) -> Self {
        Self::Remove { namespace, id }
    }

    pub fn clear_lists(scope: T::Scope) -> Self {
        Self::ClearLists { scope }
    }

    pub fn clear_namespace(namespace: T::Namespace) -> Self {
        Self::ClearNamespace { namespace }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::SetList { .. } => "set_list",
            Self::SetOne { .. } => "set_one",
            Self::Remove { .. } => "remove",
            Self::ClearLists { .. } => "clear_lists",
            Self::ClearNamespace { .. } => "clear_namespace",
        }
    }
}

/// Root action, dispatched to every slice reducer.
#[derive(Debug, Clone, PartialEq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    Homes(SliceAction<Home>),
    Devices(SliceAction<Device>),
    KeyValues(SliceAction<KeyValue>),
    Entities(SliceAction<Entity>),
    TimeSeries(SliceAction<TimeSeries>),
    Alerts(SliceAction<Alert>),
    /// Forget everything (session ended).
    Reset,
}

impl Action {
    /// `slice/action` label for logs.
    pub fn label(&self) -> String {
        let slice: &'static str = self.into();
        let kind = match self {
            Self::Homes(a) => a.kind(),
            Self::Devices(a) => a.kind(),
            Self::KeyValues(a) => a.kind(),
            Self::Entities(a) => a.kind(),
            Self::TimeSeries(a) => a.kind(),
            Self::Alerts(a) => a.kind(),
            Self::Reset => return slice.to_owned(),
        };
        format!("{slice}/{kind}")
    }
}

impl<T: Normalized> From<SliceAction<T>> for Action {
    fn from(action: SliceAction<T>) -> Self {
        T::into_action(action)
    }
}
