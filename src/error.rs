use thiserror::Error;

/// Unified error type for gitfs operations
#[derive(Error, Debug)]
pub enum GitFsError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Directory expected: {0}")]
    DirectoryExpected(String),

    #[error("File expected: {0}")]
    FileExpected(String),

    #[error("Resource is read only: {0}")]
    ResourceReadOnly(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Illegal back reference: {0}")]
    IllegalBackReference(String),

    #[error("Unsupported protocol: {0}")]
    UnsupportedProtocol(String),

    #[error("Invalid filesystem URL: {0}")]
    InvalidUrl(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Task error: {0}")]
    Task(String),
}

/// Convenience type alias for Results in gitfs
pub type Result<T> = std::result::Result<T, GitFsError>;

impl GitFsError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitFsError::Config(msg.into())
    }

    /// Create a not-found error for a path
    pub fn not_found(path: impl Into<String>) -> Self {
        GitFsError::ResourceNotFound(path.into())
    }

    /// Create a read-only error for a path
    pub fn read_only(path: impl Into<String>) -> Self {
        GitFsError::ResourceReadOnly(path.into())
    }

    /// Create a task error with context
    pub fn task(msg: impl Into<String>) -> Self {
        GitFsError::Task(msg.into())
    }
}
