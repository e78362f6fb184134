//! chathook: push content from an analysis session to a chat channel through
//! an HTTP webhook.
//!
//! The crate is a thin convenience wrapper: a [`Connection`] names the
//! destination, the [`chunk`] module fits oversized console output under the
//! per-message ceiling, the [`Dispatcher`] issues one POST per payload or
//! chunk, and the [`capture`] adapters turn host state (plots, values,
//! formulas) into file payloads. No retries, no concurrency, no persistence
//! beyond the connection CSV files.

pub mod capture;
pub mod chunk;
pub mod cli;
pub mod connection;
pub mod dispatch;
pub mod error;
pub mod payload;

pub use chunk::{chunk_text, fence, DEFAULT_CHUNK_SIZE, MESSAGE_CEILING};
pub use connection::{
    clear_default_connection, default_connection, export_connections, import_connections,
    set_default_connection, Connection,
};
pub use dispatch::{ChunkOutcome, Dispatcher, HttpTransport, Receipt, TextMessage, Transport};
pub use error::{Error, Result};
pub use payload::Payload;
