//! Typed live subscriptions over a store listener.

use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::{FusedStream, Stream};
use tokio::sync::mpsc;

use super::codec::decode_snapshots;
use crate::infra::store::{Listener, ListenerRegistration, SnapshotEvent};
use common::AppResult;
use domain::Record;

/// Stream of full, ordered entity lists for one query.
///
/// The first item is the current result set. A listener failure is yielded
/// once as `Err` and ends the stream. Cancelling or dropping the subscription
/// detaches the listener exactly once; nothing is yielded afterwards.
pub struct Subscription<E> {
    events: mpsc::UnboundedReceiver<SnapshotEvent>,
    registration: ListenerRegistration,
    terminated: bool,
    _record: PhantomData<fn() -> E>,
}

impl<E: Record> Subscription<E> {
    pub fn new(listener: Listener) -> Self {
        let (events, registration) = listener.into_parts();
        Self {
            events,
            registration,
            terminated: false,
            _record: PhantomData,
        }
    }

    /// Detach the listener. Calling it again does nothing.
    pub fn cancel(&mut self) {
        if self.registration.is_active() {
            tracing::debug!(collection = E::COLLECTION, "Subscription cancelled");
        }
        self.finish();
    }

    /// Whether the listener is still attached
    pub fn is_active(&self) -> bool {
        !self.terminated && self.registration.is_active()
    }

    fn finish(&mut self) {
        self.terminated = true;
        self.registration.remove();
        self.events.close();
    }
}

impl<E: Record> Stream for Subscription<E> {
    type Item = AppResult<Vec<E>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.terminated {
            return Poll::Ready(None);
        }

        match this.events.poll_recv(cx) {
            Poll::Ready(Some(Ok(snapshots))) => {
                Poll::Ready(Some(Ok(decode_snapshots::<E>(snapshots))))
            }
            Poll::Ready(Some(Err(e))) => {
                tracing::warn!(collection = E::COLLECTION, error = %e, "Listener failed");
                this.finish();
                Poll::Ready(Some(Err(e)))
            }
            Poll::Ready(None) => {
                this.finish();
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<E: Record> FusedStream for Subscription<E> {
    fn is_terminated(&self) -> bool {
        self.terminated
    }
}

impl<E> std::fmt::Debug for Subscription<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("terminated", &self.terminated)
            .field("registration", &self.registration)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::store::DocumentSnapshot;
    use common::AppError;
    use domain::{ChatMessage, Sender};
    use futures::StreamExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio_test::{assert_pending, task};

    fn channel_subscription(
        detached: Arc<AtomicUsize>,
    ) -> (mpsc::UnboundedSender<SnapshotEvent>, Subscription<ChatMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let registration = ListenerRegistration::new(move || {
            detached.fetch_add(1, Ordering::SeqCst);
        });
        (tx, Subscription::new(Listener::new(rx, registration)))
    }

    fn message_snapshot(id: &str, text: &str) -> DocumentSnapshot {
        let message = ChatMessage::new("u1", "p1", Sender::User, text);
        DocumentSnapshot::new(id, crate::repository::codec::encode(&message).unwrap())
    }

    #[tokio::test]
    async fn test_error_is_terminal() {
        let detached = Arc::new(AtomicUsize::new(0));
        let (tx, mut subscription) = channel_subscription(detached.clone());

        tx.send(Ok(vec![message_snapshot("m1", "hi")])).unwrap();
        tx.send(Err(AppError::store("permission denied"))).unwrap();
        tx.send(Ok(vec![])).ok();

        let first = subscription.next().await.unwrap().unwrap();
        assert_eq!(first[0].id, "m1");

        let err = subscription.next().await.unwrap().unwrap_err();
        assert_eq!(err.code(), "STORE_ERROR");

        assert!(subscription.next().await.is_none());
        assert!(subscription.is_terminated());
        assert_eq!(detached.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancel_detaches_once() {
        let detached = Arc::new(AtomicUsize::new(0));
        let (tx, mut subscription) = channel_subscription(detached.clone());

        subscription.cancel();
        subscription.cancel();
        tx.send(Ok(vec![message_snapshot("m1", "late")])).ok();

        assert!(subscription.next().await.is_none());
        drop(subscription);
        assert_eq!(detached.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_pending_until_next_snapshot() {
        let (tx, subscription) = channel_subscription(Arc::new(AtomicUsize::new(0)));
        let mut subscription = task::spawn(subscription);
        assert_pending!(subscription.poll_next());

        tx.send(Ok(vec![message_snapshot("m1", "hi")])).unwrap();
        assert!(subscription.is_woken());
        assert!(matches!(
            subscription.poll_next(),
            Poll::Ready(Some(Ok(ref messages))) if messages.len() == 1
        ));
        assert_pending!(subscription.poll_next());
    }

    #[tokio::test]
    async fn test_drop_detaches() {
        let detached = Arc::new(AtomicUsize::new(0));
        let (_tx, subscription) = channel_subscription(detached.clone());

        assert!(subscription.is_active());
        drop(subscription);
        assert_eq!(detached.load(Ordering::SeqCst), 1);
    }
}
