//! Error types for the research MCP server.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::path::PathBuf;
use std::time::Duration;

/// A value failed a model or input invariant.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field}: {message}")]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,
    /// Validation error message
    pub message: String,
}

impl ValidationError {
    /// Create a validation error for a field.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

/// Errors from the paper search adapter (arXiv HTTP client).
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Rate limited by the arXiv API (429 or 503 with Retry-After)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The Atom feed could not be parsed
    #[error("Failed to parse feed: {0}")]
    Feed(String),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a feed parse error.
    #[must_use]
    pub fn feed(message: impl Into<String>) -> Self {
        Self::Feed(message.into())
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Timeout(_) | Self::Server { .. })
    }

    /// Get the retry-after duration if this is a rate limit error.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}

/// Errors from the on-disk paper store.
///
/// Only writes fail; reads degrade to empty collections instead.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// The topic or a record was rejected before touching disk
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Directory creation or file write failed
    #[error("Storage error at {}: {source}", path.display())]
    Storage {
        /// Path being written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The collection could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Create a storage error for a path.
    #[must_use]
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage { path: path.into(), source }
    }
}

/// Errors from MCP tool execution.
#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    /// Error from the search adapter
    #[error("Search error: {0}")]
    Client(#[from] ClientError),

    /// Error from the paper store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Input validation failed
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// Paper absent from every topic
    #[error("Not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
        /// Topics that were searched
        searched_topics: Vec<String>,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal tool logic error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for ToolError {
    fn from(err: ValidationError) -> Self {
        Self::Validation { field: err.field, message: err.message }
    }
}

impl ToolError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>, searched_topics: Vec<String>) -> Self {
        Self::NotFound { resource: resource.into(), searched_topics }
    }

    /// Create an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Short error type name used in structured error payloads.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Client(_) => "AdapterError",
            Self::Store(StoreError::Validation(_)) | Self::Validation { .. } => "ValidationError",
            Self::Store(_) => "StorageError",
            Self::NotFound { .. } => "NotFoundError",
            Self::Serialization(_) => "SerializationError",
            Self::Internal(_) => "InternalError",
        }
    }

    /// Whether this is an anticipated outcome (bad input, unknown paper)
    /// rather than a fault in the adapter or store.
    #[must_use]
    pub const fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::NotFound { .. } | Self::Store(StoreError::Validation(_))
        )
    }

    /// Convert to a user-friendly error message for MCP response.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Client(ClientError::RateLimited { retry_after }) => {
                format!(
                    "Rate limited by the arXiv API. Please wait {:?} before retrying.",
                    retry_after
                )
            }
            Self::NotFound { resource, .. } => {
                format!("No saved information found for {resource}.")
            }
            Self::Validation { field, message }
            | Self::Store(StoreError::Validation(ValidationError { field, message })) => {
                format!("Invalid input for '{field}': {message}")
            }
            _ => self.to_string(),
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for store write operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;
