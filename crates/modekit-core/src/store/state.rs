// ── Root state ──

use super::action::Action;
use super::slice::Slice;
use crate::model::{Alert, Device, Entity, Home, KeyValue, TimeSeries};

/// Immutable snapshot of the whole cache.
///
/// Produced by [`RootState::reduce`]; slices an action does not touch
/// keep their containers, so cloning a state is a handful of `Arc` bumps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootState {
    pub homes: Slice<Home>,
    pub devices: Slice<Device>,
    pub key_values: Slice<KeyValue>,
    pub entities: Slice<Entity>,
    pub time_series: Slice<TimeSeries>,
    pub alerts: Slice<Alert>,
}

impl RootState {
    /// Pure reducer: the next state after `action`. `self` is unchanged.
    #[must_use]
    pub fn reduce(&self, action: &Action) -> Self {
        let mut next = self.clone();
        next.homes.reduce(action);
        next.devices.reduce(action);
        next.key_values.reduce(action);
        next.entities.reduce(action);
        next.time_series.reduce(action);
        next.alerts.reduce(action);
        next
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::fixtures::{device, home};
    use crate::model::ItemRange;
    use crate::query::Page;
    use crate::store::SliceAction;

    #[test]
    fn reduce_leaves_input_untouched() {
        let before = RootState::default();
        let after = before.reduce(&SliceAction::<Home>::set_one((), home(1, "A")).into());
        assert!(before.homes.get(&(), &1).is_none());
        assert!(after.homes.get(&(), &1).is_some());
    }

    #[test]
    fn untouched_slices_share_containers() {
        let state = RootState::default().reduce(
            &SliceAction::<Device>::set_list(
                4,
                Page::first(10).key(),
                (),
                ItemRange::new(0, 1, 1),
                vec![device(9, 4, "sensor")],
            )
            .into(),
        );
        let next = state.reduce(&SliceAction::<Home>::set_one((), home(1, "A")).into());

        assert!(Arc::ptr_eq(
            state.devices.entities().rows(),
            next.devices.entities().rows()
        ));
        assert!(Arc::ptr_eq(
            state.devices.lists().entries(),
            next.devices.lists().entries()
        ));
        assert!(!Arc::ptr_eq(
            state.homes.entities().rows(),
            next.homes.entities().rows()
        ));
    }

    #[test]
    fn reset_clears_every_slice() {
        let state = RootState::default()
            .reduce(&SliceAction::<Home>::set_one((), home(1, "A")).into())
            .reduce(&SliceAction::<Device>::set_one((), device(2, 1, "d")).into())
            .reduce(&Action::Reset);
        assert_eq!(state, RootState::default());
    }
}
