//! Connection model: the webhook endpoint plus display identity attached to
//! every outgoing message, the process-wide default slot, and CSV
//! import/export of connection sets.

use std::path::Path;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};

/// Environment variable holding a fallback webhook URL (legacy mode).
pub const ENV_WEBHOOK: &str = "CHATHOOK_WEBHOOK";
/// Environment variable holding a fallback display username (legacy mode).
pub const ENV_USERNAME: &str = "CHATHOOK_USERNAME";

/// Display username used when the environment supplies a webhook but no name.
const FALLBACK_USERNAME: &str = "chathook";

/// An immutable webhook destination: endpoint URL, display username and
/// optional human-readable labels. Changing any field means constructing a
/// new `Connection`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    webhook_url: String,
    username: String,
    server_label: Option<String>,
    channel_label: Option<String>,
}

impl Connection {
    /// Create a connection. Fails with [`Error::InvalidArgument`] if
    /// `webhook_url` or `username` is empty. The URL is treated as opaque:
    /// no format or reachability checks.
    pub fn new(
        webhook_url: impl Into<String>,
        username: impl Into<String>,
        server_label: Option<String>,
        channel_label: Option<String>,
    ) -> Result<Self> {
        let webhook_url = webhook_url.into();
        let username = username.into();
        if webhook_url.is_empty() {
            return Err(Error::InvalidArgument("webhook_url must not be empty".into()));
        }
        if username.is_empty() {
            return Err(Error::InvalidArgument("username must not be empty".into()));
        }
        Ok(Connection {
            webhook_url,
            username,
            server_label,
            channel_label,
        })
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn server_label(&self) -> Option<&str> {
        self.server_label.as_deref()
    }

    pub fn channel_label(&self) -> Option<&str> {
        self.channel_label.as_deref()
    }
}

// Single process-wide slot, last-write-wins. Read-modify-write is not atomic
// across callers; intended usage is single-user and interactive.
static DEFAULT_CONNECTION: RwLock<Option<Connection>> = RwLock::new(None);

/// Register `conn` as the process-wide default, replacing any previous one.
pub fn set_default_connection(conn: Connection) {
    info!(
        webhook_url = %conn.webhook_url,
        username = %conn.username,
        "setting default connection"
    );
    let mut slot = DEFAULT_CONNECTION.write().unwrap_or_else(|e| e.into_inner());
    *slot = Some(conn);
}

/// Clear the default slot. Subsequent [`default_connection`] calls fall back
/// to the environment, then fail with [`Error::NotConfigured`].
pub fn clear_default_connection() {
    let mut slot = DEFAULT_CONNECTION.write().unwrap_or_else(|e| e.into_inner());
    *slot = None;
}

/// The connection used when a caller does not supply one explicitly: the
/// default slot if set, otherwise a connection assembled from the
/// `CHATHOOK_WEBHOOK` / `CHATHOOK_USERNAME` environment variables.
pub fn default_connection() -> Result<Connection> {
    {
        let slot = DEFAULT_CONNECTION.read().unwrap_or_else(|e| e.into_inner());
        if let Some(conn) = slot.as_ref() {
            return Ok(conn.clone());
        }
    }

    match std::env::var(ENV_WEBHOOK) {
        Ok(webhook_url) if !webhook_url.is_empty() => {
            let username = std::env::var(ENV_USERNAME)
                .ok()
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| FALLBACK_USERNAME.to_string());
            info!(username = %username, "using webhook from environment");
            Connection::new(webhook_url, username, None, None)
        }
        _ => Err(Error::NotConfigured(
            "no default connection set and CHATHOOK_WEBHOOK is not in the environment",
        )),
    }
}

/// One row of the connection CSV. Header and column order:
/// `server_name,channel_name,username,webhook`.
#[derive(Debug, Serialize, Deserialize)]
struct ConnectionRow {
    server_name: String,
    channel_name: String,
    username: String,
    webhook: String,
}

impl From<&Connection> for ConnectionRow {
    fn from(conn: &Connection) -> Self {
        ConnectionRow {
            server_name: conn.server_label.clone().unwrap_or_default(),
            channel_name: conn.channel_label.clone().unwrap_or_default(),
            username: conn.username.clone(),
            webhook: conn.webhook_url.clone(),
        }
    }
}

impl TryFrom<ConnectionRow> for Connection {
    type Error = Error;

    fn try_from(row: ConnectionRow) -> Result<Connection> {
        let none_if_empty = |s: String| if s.is_empty() { None } else { Some(s) };
        Connection::new(
            row.webhook,
            row.username,
            none_if_empty(row.server_name),
            none_if_empty(row.channel_name),
        )
    }
}

/// Write `conns` to the CSV file at `path`, in order.
///
/// With `append` set and an existing file, the existing rows are read back
/// and the whole file rewritten with the new rows concatenated after them
/// (CSV has no native append that preserves a single header). Otherwise the
/// file is replaced.
pub fn export_connections(conns: &[Connection], path: impl AsRef<Path>, append: bool) -> Result<()> {
    let path = path.as_ref();

    let mut rows: Vec<ConnectionRow> = Vec::new();
    if append && path.exists() {
        for existing in import_connections(path)? {
            rows.push(ConnectionRow::from(&existing));
        }
    }
    rows.extend(conns.iter().map(ConnectionRow::from));

    let mut writer = csv::Writer::from_path(path)?;
    let count = rows.len();
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = count, append, "exported connections");
    Ok(())
}

/// Read every row of the CSV file at `path` into a `Connection`, preserving
/// file row order. Fails with [`Error::FileNotFound`] if the path is absent.
pub fn import_connections(path: impl AsRef<Path>) -> Result<Vec<Connection>> {
    let path = path.as_ref();
    if !path.exists() {
        warn!(path = %path.display(), "connection file does not exist");
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut conns = Vec::new();
    for row in reader.deserialize::<ConnectionRow>() {
        conns.push(Connection::try_from(row?)?);
    }

    info!(path = %path.display(), count = conns.len(), "imported connections");
    Ok(conns)
}
