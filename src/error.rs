use thiserror::Error;

/// Error types surfaced by the packagecloud API client.
///
/// Every variant is terminal for the operation in progress; nothing is
/// retried internally.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure: connection, TLS, or request construction.
    #[error("error during HTTP request: {0}")]
    Network(#[from] reqwest::Error),
    /// The server answered with a non-success status. For 422 responses the
    /// message is the first validation message reported by the server,
    /// verbatim.
    #[error("{message}")]
    Http { status: u16, message: String },
    /// A success response carried a body that could not be decoded.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
    /// The distro/version pair is not present in the distributions catalog.
    #[error("invalid distro name: {0}")]
    InvalidDistro(String),
    /// A list response came back without one of its pagination headers.
    #[error("missing pagination header {0:?}")]
    PaginationHeaderMissing(&'static str),
    /// A pagination header did not hold an integer.
    #[error("malformed pagination header {name:?}: {value:?}")]
    PaginationHeaderMalformed { name: &'static str, value: String },
    /// Local I/O failure while reading a package file for upload.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
