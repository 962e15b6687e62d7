use thiserror::Error;

/// Errors that can occur while fetching scan pages.
///
/// Callers only ever need to tell two situations apart: a page fetch that
/// could not complete (see [`ScanError::is_retriable`]) and a cursor that was
/// asked for a page it does not have ([`ScanError::NoNextPage`]).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("I/O failure during {operation} on '{table}': {message}")]
    Io {
        operation: &'static str,
        table: String,
        message: String,
    },
    #[error("Nothing left in the iterator")]
    NoNextPage,
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Credentials failed: {0}")]
    Credentials(String),
    #[error("Conversion error: {0}")]
    Conversion(String),
}

impl ScanError {
    /// Builds an [`ScanError::Io`] for a failed remote call.
    pub fn io(
        operation: &'static str,
        table: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Io {
            operation,
            table: table.into(),
            message: message.into(),
        }
    }

    /// Whether reissuing the same request may succeed.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Credentials(_))
    }
}

/// Result type for scan operations.
pub type Result<T> = std::result::Result<T, ScanError>;
