//! Storage errors
//!
//! TigerStyle: Absence is a value (`Lookup::NotFound`), never an error. These
//! variants are genuine failures and always reach the caller.

/// Result alias for store operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// A store operation that could not complete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The store could not be reached.
    #[error("connection error: {0}")]
    Connection(String),

    /// A query failed.
    #[error("read error: {0}")]
    Read(String),

    /// The store rejected or could not complete a write.
    #[error("write error: {0}")]
    Write(String),

    /// Namespace or tables could not be created.
    #[error("schema setup error: {0}")]
    Schema(String),

    /// Adapter configuration is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// A stored row could not be decoded.
    #[error("internal error: {0}")]
    Internal(String),
}

impl StorageError {
    /// Connection failure.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Read failure.
    pub fn read(msg: impl Into<String>) -> Self {
        Self::Read(msg.into())
    }

    /// Write failure.
    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }

    /// Schema setup failure.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Configuration failure.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Decoding failure.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// True for failures of a create operation.
    #[must_use]
    pub fn is_write(&self) -> bool {
        matches!(self, Self::Write(_))
    }
}
