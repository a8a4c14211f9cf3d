//! HTTP transport for the managed service.
//!
//! Speaks the service's REST API for mutations and its streaming watch
//! endpoint for live snapshots. No request timeouts are configured — latency
//! characteristics are inherited from the service, and the watch stream is
//! long-lived by design.

use super::types::{ClientError, Identity, NewPost, Post};
use futures::StreamExt;
use reqwest::header::AUTHORIZATION;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base: Url,
    api_key: SecretString,
}

/// Response body for a successful add: the assigned document id.
#[derive(Debug, Deserialize)]
struct AddResponse {
    id: String,
}

impl HttpTransport {
    pub fn new(server_url: &str, api_key: SecretString) -> Result<Self, ClientError> {
        let base = Url::parse(server_url)?;
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base,
            api_key,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base.join(path)?)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.api_key.expose_secret())
    }

    /// Map a non-success response to `ClientError::Status` with its body.
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(body));
        }
        Err(ClientError::Status { status, body })
    }

    /// Interactive sign-in. The provider drives its own interaction; this
    /// client only sees the resulting identity.
    pub async fn sign_in(&self) -> Result<Identity, ClientError> {
        let resp = self
            .http
            .post(self.endpoint("v1/auth/session")?)
            .header(AUTHORIZATION, self.bearer())
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json::<Identity>().await?)
    }

    /// Clear the provider session. Best-effort at every call site.
    pub async fn sign_out(&self) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(self.endpoint("v1/auth/session")?)
            .header(AUTHORIZATION, self.bearer())
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    pub async fn add(&self, draft: &NewPost) -> Result<String, ClientError> {
        let resp = self
            .http
            .post(self.endpoint("v1/tweets")?)
            .header(AUTHORIZATION, self.bearer())
            .json(draft)
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json::<AddResponse>().await?.id)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(self.endpoint(&format!("v1/tweets/{id}"))?)
            .header(AUTHORIZATION, self.bearer())
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    /// Server-side atomic +1 on `reportCount`.
    pub async fn report(&self, id: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .post(self.endpoint(&format!("v1/tweets/{id}/report"))?)
            .header(AUTHORIZATION, self.bearer())
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    /// Open the watch stream: newline-delimited JSON where each line is a
    /// full snapshot of the collection ordered `createdAt` descending.
    pub async fn watch(&self) -> Result<WatchStream, ClientError> {
        let resp = self
            .http
            .get(self.endpoint("v1/tweets/watch")?)
            .header(AUTHORIZATION, self.bearer())
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        Ok(WatchStream {
            stream: Box::pin(resp.bytes_stream().map(|chunk| chunk.map(|b| b.to_vec()))),
            buffer: Vec::new(),
            done: false,
        })
    }
}

// ============================================================================
// Watch Stream
// ============================================================================

type ByteStream =
    std::pin::Pin<Box<dyn futures::Stream<Item = Result<Vec<u8>, reqwest::Error>> + Send>>;

/// Line-buffered reader over the watch endpoint's byte stream.
pub struct WatchStream {
    stream: ByteStream,
    buffer: Vec<u8>,
    done: bool,
}

impl WatchStream {
    /// Next full snapshot from the stream, or `None` when the service closes
    /// the connection. Blank keepalive lines and undecodable lines are
    /// skipped with a warning — a later snapshot supersedes them anyway.
    pub async fn next_snapshot(&mut self) -> Option<Vec<Post>> {
        loop {
            if let Some(line) = self.take_line() {
                if line.is_empty() {
                    continue;
                }
                match serde_json::from_slice::<Vec<Post>>(&line) {
                    Ok(snapshot) => return Some(snapshot),
                    Err(e) => {
                        tracing::warn!(error = %e, "Skipping undecodable snapshot line");
                        continue;
                    }
                }
            }

            if self.done {
                return None;
            }

            match self.stream.next().await {
                Some(Ok(chunk)) => self.buffer.extend_from_slice(&chunk),
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "Watch stream error, ending subscription");
                    self.done = true;
                }
                None => self.done = true,
            }
        }
    }

    /// Pop one complete line from the buffer, if present. On stream end the
    /// remaining partial buffer is drained as a final line.
    fn take_line(&mut self) -> Option<Vec<u8>> {
        if let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.buffer.drain(..=pos).collect();
            line.pop(); // trailing newline
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            return Some(line);
        }
        if self.done && !self.buffer.is_empty() {
            return Some(std::mem::take(&mut self.buffer));
        }
        None
    }
}
