//! Outbound dispatch: one HTTP POST per payload or chunk.
//!
//! The [`Transport`] trait is the seam between the dispatcher and the actual
//! HTTP client, so orchestration (ordering, pausing, soft no-ops) can be
//! tested against a mock without a network. [`HttpTransport`] is the real
//! implementation over a shared `reqwest::Client`.

use std::time::Duration;

use async_trait::async_trait;
#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;
use reqwest::multipart;
use serde::Serialize;
use tracing::{info, warn};

use crate::chunk::{chunk_text, fence};
use crate::connection::{self, Connection};
use crate::error::{Error, Result};
use crate::payload::Payload;

/// Pause between successive chunk sends, respecting the destination's
/// unstated rate limit.
pub const DEFAULT_PAUSE: Duration = Duration::from_secs(1);

/// JSON body of a text post: `{content, username}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextMessage {
    pub content: String,
    pub username: String,
}

/// Raw per-request outcome: the HTTP status as the endpoint returned it.
/// Non-2xx statuses are results, not errors; nothing here retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receipt {
    pub status: u16,
}

impl Receipt {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Per-chunk result of a chunked send, in send order. A transport error on
/// one chunk does not stop the remaining chunks from being sent.
pub type ChunkOutcome = std::result::Result<Receipt, Error>;

/// Low-level HTTP seam. Implemented by [`HttpTransport`] in production and
/// by the generated mock in tests.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `message` as a JSON body to `url`, returning the raw status.
    async fn post_json(&self, url: &str, message: &TextMessage) -> Result<u16>;

    /// POST a multipart form to `url` with one `content` file field and one
    /// `username` text field, returning the raw status.
    async fn post_multipart(
        &self,
        url: &str,
        username: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<u16>;
}

/// Production transport over a shared `reqwest::Client`. Uses whatever
/// timeout the client defaults to; no retries.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        HttpTransport {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, message: &TextMessage) -> Result<u16> {
        let response = self.client.post(url).json(message).send().await?;
        Ok(response.status().as_u16())
    }

    async fn post_multipart(
        &self,
        url: &str,
        username: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<u16> {
        let part = multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = multipart::Form::new()
            .part("content", part)
            .text("username", username.to_string());
        let response = self.client.post(url).multipart(form).send().await?;
        Ok(response.status().as_u16())
    }
}

/// Synchronous, sequential dispatcher. One blocking request per payload or
/// chunk; chunked sends sleep `pause` between successive requests.
pub struct Dispatcher<T: Transport = HttpTransport> {
    transport: T,
    pause: Duration,
}

impl Dispatcher<HttpTransport> {
    pub fn new() -> Self {
        Self::with_transport(HttpTransport::new())
    }
}

impl Default for Dispatcher<HttpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> Dispatcher<T> {
    pub fn with_transport(transport: T) -> Self {
        Dispatcher {
            transport,
            pause: DEFAULT_PAUSE,
        }
    }

    /// Override the inter-chunk pause. Tests pass `Duration::ZERO`.
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Send one text message. Empty text is a soft no-op: a notice is logged
    /// and `Ok(None)` returned without issuing a request.
    pub async fn send_text(&self, conn: &Connection, text: &str) -> Result<Option<Receipt>> {
        if text.is_empty() {
            warn!("empty message, nothing sent");
            return Ok(None);
        }

        let message = TextMessage {
            content: text.to_string(),
            username: conn.username().to_string(),
        };
        let status = self.transport.post_json(conn.webhook_url(), &message).await?;
        info!(
            webhook_url = %conn.webhook_url(),
            status,
            content_len = text.len(),
            "sent text message"
        );
        Ok(Some(Receipt { status }))
    }

    /// Send one text message over the default connection
    /// (see [`connection::default_connection`]).
    pub async fn send_text_default(&self, text: &str) -> Result<Option<Receipt>> {
        let conn = connection::default_connection()?;
        self.send_text(&conn, text).await
    }

    /// Dispatch any payload: text goes out as a JSON post, file and binary
    /// payloads as a single multipart post. A file payload whose path does
    /// not exist at call time fails with [`Error::FileNotFound`].
    pub async fn send_payload(&self, conn: &Connection, payload: &Payload) -> Result<Option<Receipt>> {
        match payload {
            Payload::Text(text) => self.send_text(conn, text).await,
            Payload::File(path) => {
                if !path.exists() {
                    return Err(Error::FileNotFound(path.clone()));
                }
                let bytes = std::fs::read(path)?;
                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "upload.bin".to_string());
                self.post_file(conn, &filename, bytes).await
            }
            Payload::Binary { bytes, filename } => {
                self.post_file(conn, filename, bytes.clone()).await
            }
        }
    }

    async fn post_file(
        &self,
        conn: &Connection,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<Option<Receipt>> {
        let size = bytes.len();
        let status = self
            .transport
            .post_multipart(conn.webhook_url(), conn.username(), filename, bytes)
            .await?;
        info!(
            webhook_url = %conn.webhook_url(),
            status,
            filename,
            size,
            "sent file"
        );
        Ok(Some(Receipt { status }))
    }

    /// Chunk `text` (see [`chunk_text`]), fence each chunk for fixed-width
    /// rendering, and send the chunks strictly in order with `pause` between
    /// successive sends.
    ///
    /// A failed chunk does not stop the rest: delivery is best-effort and
    /// every per-chunk outcome comes back in send order. Empty text is the
    /// same soft no-op as [`send_text`](Self::send_text).
    pub async fn send_chunked_text(
        &self,
        conn: &Connection,
        text: &str,
        max_chunk_size: usize,
    ) -> Result<Option<Vec<ChunkOutcome>>> {
        if text.is_empty() {
            warn!("empty message, nothing sent");
            return Ok(None);
        }

        let chunks = chunk_text(text, max_chunk_size);
        info!(
            webhook_url = %conn.webhook_url(),
            content_len = text.len(),
            chunk_count = chunks.len(),
            max_chunk_size,
            "sending chunked text"
        );

        let mut outcomes = Vec::with_capacity(chunks.len());
        for (i, chunk) in chunks.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.pause).await;
            }
            let message = TextMessage {
                content: fence(chunk),
                username: conn.username().to_string(),
            };
            match self.transport.post_json(conn.webhook_url(), &message).await {
                Ok(status) => outcomes.push(Ok(Receipt { status })),
                Err(e) => {
                    warn!(chunk = i, error = %e, "chunk dispatch failed, continuing");
                    outcomes.push(Err(e));
                }
            }
        }
        Ok(Some(outcomes))
    }

    /// Chunked send over the default connection.
    pub async fn send_chunked_text_default(
        &self,
        text: &str,
        max_chunk_size: usize,
    ) -> Result<Option<Vec<ChunkOutcome>>> {
        let conn = connection::default_connection()?;
        self.send_chunked_text(&conn, text, max_chunk_size).await
    }
}
