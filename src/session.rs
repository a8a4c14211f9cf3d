//! Session controller.
//!
//! Tracks the authenticated identity as a single reactive value: the
//! provider owns the identity's lifecycle, this controller only publishes
//! current-identity-or-none over a watch channel. Everything else in the UI
//! is gated on that value, and the feed subscription's lifetime is tied to
//! its transitions.

use crate::client::{Client, ClientError, Identity};
use tokio::sync::watch;

#[derive(Clone)]
pub struct Session {
    client: Client,
    current: watch::Sender<Option<Identity>>,
}

impl Session {
    /// Create a signed-out session. The returned receiver observes every
    /// identity transition.
    pub fn new(client: Client) -> (Self, watch::Receiver<Option<Identity>>) {
        let (current, rx) = watch::channel(None);
        (Self { client, current }, rx)
    }

    /// Current identity, or `None` when signed out.
    pub fn current(&self) -> Option<Identity> {
        self.current.borrow().clone()
    }

    /// Run the provider's interactive sign-in flow. On success the ambient
    /// identity updates; failure is the caller's to report. Not retried.
    pub async fn sign_in(&self) -> Result<Identity, ClientError> {
        let identity = self.client.sign_in().await?;
        tracing::info!(uid = %identity.uid, "Signed in");
        self.current.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    /// Clear the session. The provider call is best-effort: the local
    /// identity is cleared regardless, which must tear down the feed
    /// subscription.
    pub async fn sign_out(&self) {
        if let Err(e) = self.client.sign_out().await {
            tracing::warn!(error = %e, "Provider sign-out failed, clearing local session anyway");
        }
        tracing::info!("Signed out");
        self.current.send_replace(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_identity() -> Identity {
        Identity {
            uid: "u1".into(),
            display_name: "Jane Doe".into(),
        }
    }

    #[tokio::test]
    async fn starts_signed_out() {
        let (session, rx) = Session::new(Client::in_memory(test_identity()));
        assert!(session.current().is_none());
        assert!(rx.borrow().is_none());
    }

    #[tokio::test]
    async fn sign_in_publishes_identity() {
        let (session, mut rx) = Session::new(Client::in_memory(test_identity()));

        let identity = session.sign_in().await.unwrap();
        assert_eq!(identity.display_name, "Jane Doe");

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_ref().unwrap().uid, "u1");
    }

    #[tokio::test]
    async fn sign_out_publishes_none() {
        let (session, mut rx) = Session::new(Client::in_memory(test_identity()));
        session.sign_in().await.unwrap();
        rx.changed().await.unwrap();

        session.sign_out().await;
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
        assert!(session.current().is_none());
    }
}
