use std::path::PathBuf;

/// Outbound content, matched exhaustively by the dispatcher.
///
/// A payload never carries its own destination; the [`Connection`] is always
/// supplied separately at dispatch time.
///
/// [`Connection`]: crate::connection::Connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Plain text, sent as a JSON body.
    Text(String),
    /// A file on disk. Must exist and be readable at dispatch time.
    File(PathBuf),
    /// In-memory bytes with a suggested filename, sent as multipart.
    Binary { bytes: Vec<u8>, filename: String },
}

impl Payload {
    pub fn text(content: impl Into<String>) -> Self {
        Payload::Text(content.into())
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Payload::File(path.into())
    }

    pub fn binary(bytes: Vec<u8>, filename: impl Into<String>) -> Self {
        Payload::Binary {
            bytes,
            filename: filename.into(),
        }
    }
}
