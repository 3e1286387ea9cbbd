//! Switch-latest composition of live subscriptions.

use futures::stream::{Stream, StreamExt};

use async_stream::stream;
use common::AppResult;

enum Step<V, T> {
    Outer(Option<AppResult<V>>),
    Inner(Option<AppResult<T>>),
}

async fn next_inner<S>(inner: &mut Option<S>) -> Option<S::Item>
where
    S: Stream + Unpin,
{
    match inner {
        Some(stream) => stream.next().await,
        None => std::future::pending().await,
    }
}

/// Follow the inner stream opened for the latest key selected from `outer`.
///
/// When the selected key changes, the current inner stream is dropped (and so
/// detached) before `open` is called for the new key. A `None` key leaves no
/// inner stream open. The first error from either side is yielded and ends
/// the combined stream. It completes once `outer` has ended and the last
/// inner stream is exhausted.
pub fn switch_latest<V, K, T, O, S, Sel, Open>(
    outer: O,
    mut select: Sel,
    mut open: Open,
) -> impl Stream<Item = AppResult<T>>
where
    O: Stream<Item = AppResult<V>>,
    S: Stream<Item = AppResult<T>> + Unpin,
    K: PartialEq,
    Sel: FnMut(&V) -> Option<K>,
    Open: FnMut(&K) -> S,
{
    stream! {
        let mut outer = Box::pin(outer.fuse());
        let mut outer_done = false;
        let mut current: Option<K> = None;
        let mut inner: Option<S> = None;

        loop {
            if outer_done && inner.is_none() {
                break;
            }

            let step = tokio::select! {
                next = outer.next(), if !outer_done => Step::Outer(next),
                item = next_inner(&mut inner) => Step::Inner(item),
            };

            match step {
                Step::Outer(Some(Ok(value))) => {
                    let key = select(&value);
                    if key != current {
                        drop(inner.take());
                        inner = key.as_ref().map(&mut open);
                        current = key;
                    }
                }
                Step::Outer(Some(Err(e))) | Step::Inner(Some(Err(e))) => {
                    yield Err(e);
                    break;
                }
                Step::Outer(None) => outer_done = true,
                Step::Inner(Some(Ok(value))) => yield Ok(value),
                Step::Inner(None) => inner = None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::store::{Filter, MemoryStore};
    use crate::repository::base::{ReadRepository, WriteRepository};
    use crate::repository::record_store::RecordStore;
    use chrono::{TimeZone, Utc};
    use common::AppError;
    use domain::{Reminder, ReminderType};
    use futures::channel::mpsc;
    use std::sync::{Arc, Mutex};

    fn reminder(profile_id: &str, title: &str) -> Reminder {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        Reminder::new(profile_id, ReminderType::Medication, title, at)
    }

    #[tokio::test]
    async fn test_key_change_detaches_before_attaching() {
        let store = Arc::new(MemoryStore::new());
        let reminders = RecordStore::<Reminder>::new(store.clone());
        reminders.create(reminder("p1", "Vitamin D")).await.unwrap();
        reminders.create(reminder("p2", "Insulin")).await.unwrap();

        let listeners_at_open = Arc::new(Mutex::new(Vec::new()));
        let seen = listeners_at_open.clone();
        let counted_store = store.clone();
        let repo = reminders.clone();

        let (tx, rx) = mpsc::unbounded::<AppResult<String>>();
        let combined = switch_latest(
            rx,
            |profile_id: &String| Some(profile_id.clone()),
            move |profile_id: &String| {
                seen.lock().unwrap().push(counted_store.listener_count());
                repo.subscribe(vec![Filter::eq("profileId", profile_id.as_str())], None)
            },
        );
        let mut combined = Box::pin(combined);

        tx.unbounded_send(Ok("p1".to_string())).unwrap();
        let first = combined.next().await.unwrap().unwrap();
        assert_eq!(first[0].title, "Vitamin D");

        tx.unbounded_send(Ok("p2".to_string())).unwrap();
        let second = combined.next().await.unwrap().unwrap();
        assert_eq!(second[0].title, "Insulin");

        assert_eq!(*listeners_at_open.lock().unwrap(), vec![0, 0]);
        assert_eq!(store.listener_count(), 1);

        drop(combined);
        assert_eq!(store.listener_count(), 0);
    }

    #[tokio::test]
    async fn test_same_key_keeps_subscription() {
        let store = Arc::new(MemoryStore::new());
        let reminders = RecordStore::<Reminder>::new(store.clone());
        let opened = Arc::new(Mutex::new(0));
        let counter = opened.clone();
        let repo = reminders.clone();

        let (tx, rx) = mpsc::unbounded::<AppResult<&'static str>>();
        let mut combined = Box::pin(switch_latest(
            rx,
            |id: &&'static str| Some(*id),
            move |id: &&'static str| {
                *counter.lock().unwrap() += 1;
                repo.subscribe(vec![Filter::eq("profileId", *id)], None)
            },
        ));

        tx.unbounded_send(Ok("p1")).unwrap();
        assert!(combined.next().await.unwrap().unwrap().is_empty());

        tx.unbounded_send(Ok("p1")).unwrap();
        reminders.create(reminder("p1", "Walk")).await.unwrap();
        let update = combined.next().await.unwrap().unwrap();

        assert_eq!(update.len(), 1);
        assert_eq!(*opened.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_none_key_closes_inner() {
        let store = Arc::new(MemoryStore::new());
        let repo = RecordStore::<Reminder>::new(store.clone());

        let (tx, rx) = mpsc::unbounded::<AppResult<Option<&'static str>>>();
        let mut combined = Box::pin(switch_latest(
            rx,
            |id: &Option<&'static str>| *id,
            move |id: &&'static str| repo.subscribe(vec![Filter::eq("profileId", *id)], None),
        ));

        tx.unbounded_send(Ok(Some("p1"))).unwrap();
        combined.next().await.unwrap().unwrap();
        assert_eq!(store.listener_count(), 1);

        tx.unbounded_send(Ok(None)).unwrap();
        drop(tx);
        assert!(combined.next().await.is_none());
        assert_eq!(store.listener_count(), 0);
    }

    #[tokio::test]
    async fn test_outer_error_is_terminal() {
        let store = Arc::new(MemoryStore::new());
        let repo = RecordStore::<Reminder>::new(store.clone());

        let (tx, rx) = mpsc::unbounded::<AppResult<&'static str>>();
        let mut combined = Box::pin(switch_latest(
            rx,
            |id: &&'static str| Some(*id),
            move |id: &&'static str| repo.subscribe(vec![Filter::eq("profileId", *id)], None),
        ));

        tx.unbounded_send(Ok("p1")).unwrap();
        combined.next().await.unwrap().unwrap();

        tx.unbounded_send(Err(AppError::Unauthorized)).unwrap();
        let err = combined.next().await.unwrap().unwrap_err();
        assert_eq!(err.code(), "UNAUTHORIZED");
        assert!(combined.next().await.is_none());
        assert_eq!(store.listener_count(), 0);
    }
}
