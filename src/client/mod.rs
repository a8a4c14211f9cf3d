//! Client SDK wrapper for the managed document/auth service.
//!
//! The service owns persistence, authentication, and real-time fan-out; this
//! module is the seam the rest of the crate talks through. [`Client`] is
//! concrete and clonable with two transports:
//!
//! - HTTP: the production path against the service's REST + watch API
//! - Memory: a local simulation used by tests and `--offline` runs
//!
//! Every mutation is observed only indirectly, through the next pushed
//! snapshot — there is no local cache reconciliation anywhere.

mod http;
mod memory;
mod types;

pub use types::{ClientError, Identity, NewPost, Post};

use http::{HttpTransport, WatchStream};
use memory::MemoryService;
use secrecy::SecretString;
use tokio::sync::broadcast;

#[derive(Clone)]
pub struct Client {
    transport: Transport,
}

#[derive(Clone)]
enum Transport {
    Http(HttpTransport),
    Memory(MemoryService),
}

impl Client {
    /// Connect to the managed service over HTTP.
    pub fn connect(server_url: &str, api_key: SecretString) -> Result<Self, ClientError> {
        Ok(Self {
            transport: Transport::Http(HttpTransport::new(server_url, api_key)?),
        })
    }

    /// A fully local client backed by the in-memory service simulation.
    pub fn in_memory(identity: Identity) -> Self {
        Self {
            transport: Transport::Memory(MemoryService::new(identity)),
        }
    }

    /// Interactive provider sign-in; yields the authenticated identity.
    pub async fn sign_in(&self) -> Result<Identity, ClientError> {
        match &self.transport {
            Transport::Http(t) => t.sign_in().await,
            Transport::Memory(t) => Ok(t.sign_in()),
        }
    }

    /// Clear the provider session. Callers treat this as best-effort.
    pub async fn sign_out(&self) -> Result<(), ClientError> {
        match &self.transport {
            Transport::Http(t) => t.sign_out().await,
            Transport::Memory(_) => Ok(()),
        }
    }

    /// Persist a new post; returns the service-assigned id.
    pub async fn add(&self, draft: &NewPost) -> Result<String, ClientError> {
        match &self.transport {
            Transport::Http(t) => t.add(draft).await,
            Transport::Memory(t) => Ok(t.add(draft.clone())),
        }
    }

    /// Hard delete by id. No ownership check happens here — the UI is the
    /// only thing gating who may call this, which is a known design gap of
    /// the service contract.
    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        match &self.transport {
            Transport::Http(t) => t.delete(id).await,
            Transport::Memory(t) => {
                t.delete(id);
                Ok(())
            }
        }
    }

    /// Atomic +1 on the post's `reportCount`.
    pub async fn report(&self, id: &str) -> Result<(), ClientError> {
        match &self.transport {
            Transport::Http(t) => t.report(id).await,
            Transport::Memory(t) => t.report(id),
        }
    }

    /// Begin observing the live collection. Each delivered item is a full
    /// snapshot ordered `createdAt` descending.
    pub async fn watch(&self) -> Result<Snapshots, ClientError> {
        match &self.transport {
            Transport::Http(t) => Ok(Snapshots::Http(t.watch().await?)),
            Transport::Memory(t) => {
                let (initial, rx) = t.watch();
                Ok(Snapshots::Memory {
                    initial: Some(initial),
                    rx,
                })
            }
        }
    }
}

// ============================================================================
// Snapshot Source
// ============================================================================

/// A live sequence of full-collection snapshots.
///
/// Ends (`None`) when the service closes the stream; tearing down the
/// subscription task that polls this is the only cancellation point.
pub enum Snapshots {
    Http(WatchStream),
    Memory {
        initial: Option<Vec<Post>>,
        rx: broadcast::Receiver<Vec<Post>>,
    },
}

impl std::fmt::Debug for Snapshots {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Snapshots::Http(_) => f.write_str("Snapshots::Http(..)"),
            Snapshots::Memory { .. } => f.write_str("Snapshots::Memory { .. }"),
        }
    }
}

impl Snapshots {
    pub async fn next_snapshot(&mut self) -> Option<Vec<Post>> {
        match self {
            Snapshots::Http(stream) => stream.next_snapshot().await,
            Snapshots::Memory { initial, rx } => {
                if let Some(snapshot) = initial.take() {
                    return Some(snapshot);
                }
                loop {
                    match rx.recv().await {
                        Ok(snapshot) => return Some(snapshot),
                        // Lagged is fine: a newer full snapshot supersedes
                        // anything we skipped.
                        Err(broadcast::error::RecvError::Lagged(_)) => continue,
                        Err(broadcast::error::RecvError::Closed) => return None,
                    }
                }
            }
        }
    }
}
