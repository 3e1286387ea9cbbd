//! Authentication gateway - Holds the signed-in user and publishes changes.
//!
//! Every observer gets its own unbounded queue, seeded with the session at
//! subscription time, so no change is coalesced away before it is polled.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use futures::channel::mpsc;
use futures::stream::{BoxStream, StreamExt};
use tracing::info;

use crate::provider::IdentityProvider;
use common::AppResult;
use domain::AuthUser;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Authentication gateway trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// User of the current session
    fn current_user(&self) -> Option<AuthUser>;

    /// Exchange an identity token for a session
    async fn sign_in_with_token(&self, id_token: &str) -> AppResult<AuthUser>;

    /// End the current session
    async fn sign_out(&self) -> AppResult<()>;

    /// Current session user, then every change to it
    fn user_changes(&self) -> BoxStream<'static, Option<AuthUser>>;

    /// Whether a user is signed in, then one item per transition
    fn is_logged_in(&self) -> BoxStream<'static, bool>;
}

#[derive(Default)]
struct Session {
    user: Option<AuthUser>,
    observers: Vec<mpsc::UnboundedSender<Option<AuthUser>>>,
}

impl Session {
    /// Replace the user and queue the new value for every live observer
    fn publish(&mut self, user: Option<AuthUser>) -> Option<AuthUser> {
        self.observers
            .retain(|observer| observer.unbounded_send(user.clone()).is_ok());
        std::mem::replace(&mut self.user, user)
    }
}

/// Concrete implementation of AuthGateway backed by an identity provider.
pub struct Authenticator {
    provider: Arc<dyn IdentityProvider>,
    session: Mutex<Session>,
}

impl Authenticator {
    /// Create a gateway with no signed-in user
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            session: Mutex::new(Session::default()),
        }
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl AuthGateway for Authenticator {
    fn current_user(&self) -> Option<AuthUser> {
        self.session().user.clone()
    }

    async fn sign_in_with_token(&self, id_token: &str) -> AppResult<AuthUser> {
        let user = self.provider.exchange(id_token).await?;
        info!(uid = %user.uid, "User signed in");
        self.session().publish(Some(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) -> AppResult<()> {
        let previous = {
            let mut session = self.session();
            match session.user {
                Some(_) => session.publish(None),
                None => None,
            }
        };
        if let Some(user) = previous {
            info!(uid = %user.uid, "User signed out");
        }
        Ok(())
    }

    fn user_changes(&self) -> BoxStream<'static, Option<AuthUser>> {
        let (observer, changes) = mpsc::unbounded();
        let mut session = self.session();
        // A fresh receiver is open, so seeding cannot fail
        let _ = observer.unbounded_send(session.user.clone());
        session.observers.push(observer);
        changes.boxed()
    }

    fn is_logged_in(&self) -> BoxStream<'static, bool> {
        let mut last = None;
        self.user_changes()
            .filter_map(move |user| {
                let logged_in = user.is_some();
                let changed = last != Some(logged_in);
                last = Some(logged_in);
                futures::future::ready(changed.then_some(logged_in))
            })
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockIdentityProvider;
    use common::AppError;
    use tokio_test::{assert_pending, assert_ready_eq, task};

    fn ana() -> AuthUser {
        AuthUser {
            uid: "u1".to_string(),
            email: Some("ana@example.org".to_string()),
            display_name: Some("Ana".to_string()),
        }
    }

    fn accepting_provider() -> MockIdentityProvider {
        let mut provider = MockIdentityProvider::new();
        provider.expect_exchange().returning(|token| match token {
            "good-token" => Ok(ana()),
            _ => Err(AppError::invalid_token("signature mismatch")),
        });
        provider
    }

    #[tokio::test]
    async fn test_sign_in_sets_current_user() {
        let gateway = Authenticator::new(Arc::new(accepting_provider()));
        assert_eq!(gateway.current_user(), None);

        let user = gateway.sign_in_with_token("good-token").await.unwrap();
        assert_eq!(user.uid, "u1");
        assert_eq!(gateway.current_user(), Some(ana()));
    }

    #[tokio::test]
    async fn test_rejected_token_keeps_session() {
        let gateway = Authenticator::new(Arc::new(accepting_provider()));

        let err = gateway.sign_in_with_token("forged").await.unwrap_err();
        assert_eq!(err.code(), "INVALID_TOKEN");
        assert_eq!(gateway.current_user(), None);
    }

    #[tokio::test]
    async fn test_login_stream_follows_transitions() {
        let gateway = Authenticator::new(Arc::new(accepting_provider()));
        let mut logged_in = task::spawn(gateway.is_logged_in());

        assert_ready_eq!(logged_in.poll_next(), Some(false));
        assert_pending!(logged_in.poll_next());

        gateway.sign_in_with_token("good-token").await.unwrap();
        assert!(logged_in.is_woken());
        assert_ready_eq!(logged_in.poll_next(), Some(true));

        gateway.sign_out().await.unwrap();
        assert_ready_eq!(logged_in.poll_next(), Some(false));
        assert_eq!(gateway.current_user(), None);
    }

    #[tokio::test]
    async fn test_repeated_sign_in_is_not_a_transition() {
        let gateway = Authenticator::new(Arc::new(accepting_provider()));
        gateway.sign_in_with_token("good-token").await.unwrap();

        let mut logged_in = task::spawn(gateway.is_logged_in());
        assert_ready_eq!(logged_in.poll_next(), Some(true));

        gateway.sign_in_with_token("good-token").await.unwrap();
        assert_pending!(logged_in.poll_next());
    }

    #[tokio::test]
    async fn test_unpolled_transitions_are_all_delivered() {
        let gateway = Authenticator::new(Arc::new(accepting_provider()));
        let mut logged_in = task::spawn(gateway.is_logged_in());
        assert_ready_eq!(logged_in.poll_next(), Some(false));

        gateway.sign_in_with_token("good-token").await.unwrap();
        gateway.sign_out().await.unwrap();

        assert_ready_eq!(logged_in.poll_next(), Some(true));
        assert_ready_eq!(logged_in.poll_next(), Some(false));
        assert_pending!(logged_in.poll_next());
    }

    #[tokio::test]
    async fn test_user_changes_queue_every_session() {
        let gateway = Authenticator::new(Arc::new(accepting_provider()));
        let mut changes = task::spawn(gateway.user_changes());

        gateway.sign_in_with_token("good-token").await.unwrap();
        gateway.sign_out().await.unwrap();
        gateway.sign_out().await.unwrap();

        assert_ready_eq!(changes.poll_next(), Some(None));
        assert_ready_eq!(changes.poll_next(), Some(Some(ana())));
        assert_ready_eq!(changes.poll_next(), Some(None));
        assert_pending!(changes.poll_next());
    }

    #[tokio::test]
    async fn test_dropped_observer_is_released() {
        let gateway = Authenticator::new(Arc::new(accepting_provider()));
        drop(gateway.user_changes());
        let _kept = gateway.user_changes();

        gateway.sign_in_with_token("good-token").await.unwrap();
        assert_eq!(gateway.session().observers.len(), 1);
    }

    #[tokio::test]
    async fn test_sign_out_without_session() {
        let gateway = Authenticator::new(Arc::new(MockIdentityProvider::new()));
        gateway.sign_out().await.unwrap();
        assert_eq!(gateway.current_user(), None);
    }
}
