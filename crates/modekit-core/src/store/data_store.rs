// ── Store ──
//
// Holds the current `RootState` in a `watch` channel. `dispatch` runs the
// reducer under the channel's write lock, so concurrent dispatches are
// applied one after another and readers never see a half-applied action.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::trace;

use super::action::Action;
use super::state::RootState;
use crate::stream::StateStream;

pub struct Store {
    state: watch::Sender<Arc<RootState>>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(RootState::default())
    }

    /// Start from a pre-built state (e.g. restored from elsewhere).
    pub fn with_state(initial: RootState) -> Self {
        let (state, _) = watch::channel(Arc::new(initial));
        Self { state }
    }

    /// Current snapshot.
    pub fn state(&self) -> Arc<RootState> {
        self.state.borrow().clone()
    }

    /// Apply an action and publish the resulting state to subscribers.
    pub fn dispatch(&self, action: impl Into<Action>) {
        let action = action.into();
        trace!(action = %action.label(), "dispatch");
        self.state.send_modify(|state| {
            *state = Arc::new(state.reduce(&action));
        });
    }

    pub fn subscribe(&self) -> StateStream {
        StateStream::new(self.state.subscribe())
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.receiver_count()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::fixtures::home;
    use crate::model::Home;
    use crate::store::SliceAction;
    use futures_util::StreamExt;

    #[test]
    fn dispatch_replaces_snapshot() {
        let store = Store::new();
        let before = store.state();
        store.dispatch(SliceAction::<Home>::set_one((), home(1, "A")));
        let after = store.state();

        assert!(before.homes.get(&(), &1).is_none());
        assert_eq!(after.homes.get(&(), &1).unwrap().name, "A");
    }

    #[tokio::test]
    async fn subscribers_see_dispatches() {
        let store = Store::new();
        let mut sub = store.subscribe();
        assert_eq!(store.subscriber_count(), 1);

        store.dispatch(SliceAction::<Home>::set_one((), home(3, "C")));
        let snap = sub.changed().await.unwrap();
        assert!(snap.homes.get(&(), &3).is_some());
        assert!(Arc::ptr_eq(sub.current(), &snap));
    }

    #[tokio::test]
    async fn stream_yields_latest_state() {
        let store = Store::new();
        let mut stream = store.subscribe().into_stream();

        store.dispatch(SliceAction::<Home>::set_one((), home(1, "A")));
        store.dispatch(SliceAction::<Home>::set_one((), home(2, "B")));

        let snap = stream.next().await.unwrap();
        assert_eq!(snap.homes.entities().len(), 2);
    }

    #[tokio::test]
    async fn concurrent_dispatches_all_apply() {
        let store = Arc::new(Store::new());
        let tasks: Vec<_> = (0..16u64)
            .map(|id| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store.dispatch(SliceAction::<Home>::set_one((), home(id, "h")));
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }
        assert_eq!(store.state().homes.entities().len(), 16);
    }
}
