// ── Reactive state streams ──
//
// Subscription type for consuming cache snapshots from the Store.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::store::RootState;

/// A subscription to the root state.
///
/// Provides both point-in-time snapshot access and change notification
/// via [`changed`](Self::changed) or by converting to a `Stream`.
pub struct StateStream {
    current: Arc<RootState>,
    receiver: watch::Receiver<Arc<RootState>>,
}

impl StateStream {
    pub(crate) fn new(mut receiver: watch::Receiver<Arc<RootState>>) -> Self {
        let current = receiver.borrow_and_update().clone();
        Self { current, receiver }
    }

    /// Snapshot captured at creation (or at the last `changed()`).
    pub fn current(&self) -> &Arc<RootState> {
        &self.current
    }

    /// Latest snapshot, which may be newer than `current()`.
    pub fn latest(&self) -> Arc<RootState> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next dispatch, returning the new snapshot.
    /// Returns `None` once the Store has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<RootState>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    pub fn into_stream(self) -> StateWatchStream {
        StateWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
///
/// Yields the current snapshot first, then one per observed dispatch.
/// Dispatches that land between polls are coalesced.
pub struct StateWatchStream {
    inner: WatchStream<Arc<RootState>>,
}

impl Stream for StateWatchStream {
    type Item = Arc<RootState>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
