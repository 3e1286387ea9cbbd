//! Session lifecycle against the JWT identity provider.

use std::sync::Arc;

use futures::StreamExt;

use auth_service_lib::{AuthGateway, Authenticator, JwtIdentityProvider};
use common::IdentityConfig;
use domain::AuthUser;

fn gateway() -> (Arc<JwtIdentityProvider>, Authenticator) {
    let provider = Arc::new(JwtIdentityProvider::new(IdentityConfig::default()));
    let gateway = Authenticator::new(provider.clone());
    (provider, gateway)
}

#[tokio::test]
async fn sign_in_then_sign_out() {
    let (provider, gateway) = gateway();
    let mut user = AuthUser::new("family-42");
    user.display_name = Some("Marta".to_string());
    let token = provider.mint_dev_token(&user).unwrap();

    let mut logged_in = gateway.is_logged_in();
    assert_eq!(logged_in.next().await, Some(false));

    let signed_in = gateway.sign_in_with_token(&token).await.unwrap();
    assert_eq!(signed_in.uid, "family-42");
    assert_eq!(signed_in.greeting_name(), "Marta");
    assert_eq!(logged_in.next().await, Some(true));

    gateway.sign_out().await.unwrap();
    assert_eq!(logged_in.next().await, Some(false));
    assert!(gateway.current_user().is_none());
}

#[tokio::test]
async fn user_changes_start_with_current_session() {
    let (provider, gateway) = gateway();
    let token = provider.mint_dev_token(&AuthUser::new("u7")).unwrap();
    gateway.sign_in_with_token(&token).await.unwrap();

    let mut users = gateway.user_changes();
    let current = users.next().await.unwrap();
    assert_eq!(current.map(|u| u.uid), Some("u7".to_string()));
}

#[tokio::test]
async fn tampered_token_is_rejected() {
    let (provider, gateway) = gateway();
    let token = provider.mint_dev_token(&AuthUser::new("u1")).unwrap();
    let tampered = format!("{}x", token);

    let err = gateway.sign_in_with_token(&tampered).await.unwrap_err();
    assert_eq!(err.code(), "INVALID_TOKEN");
    assert!(gateway.current_user().is_none());
}
