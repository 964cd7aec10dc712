//! Error types module
//!
//! All errors are unified under the `AppError` enum, covering the ingestion
//! taxonomy (bad input incl. oversize, auth, staging, processing, upload,
//! record update) plus database and generic internal failures. Each variant self-describes its HTTP
//! status, machine-readable code, and preferred log level so the API boundary
//! can render responses without matching on variants itself.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected errors like validation failures
    Debug,
    /// Recoverable issues like resource limits
    Warn,
    /// Unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Staging failed: {message}")]
    Staging {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Processing failed: {0}")]
    Processing(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Record update failed: {0}")]
    RecordUpdate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            // Oversize is a bad-input case; it keeps its own variant and code
            // but answers 400 like the rest of them.
            AppError::InvalidInput(_) | AppError::PayloadTooLarge(_) => 400,
            AppError::Unauthenticated(_) => 401,
            AppError::Unauthorized(_) => 403,
            AppError::NotFound(_) => 404,
            AppError::Staging { .. }
            | AppError::Processing(_)
            | AppError::Upload(_)
            | AppError::RecordUpdate(_)
            | AppError::Database(_)
            | AppError::Internal(_)
            | AppError::InternalWithSource { .. } => 500,
        }
    }

    /// Machine-readable error code (e.g., "UPLOAD_FAILED").
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::Unauthenticated(_) => "UNAUTHENTICATED",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::Staging { .. } => "STAGING_FAILED",
            AppError::Processing(_) => "PROCESSING_FAILED",
            AppError::Upload(_) => "UPLOAD_FAILED",
            AppError::RecordUpdate(_) => "UPDATE_FAILED",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "INTERNAL_ERROR",
        }
    }

    /// Whether the caller can expect a full retry of the request to succeed.
    ///
    /// Retrying `ingest` end-to-end is safe: keys are deterministic per
    /// (record, orientation), so a retry overwrites the same object.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Staging { .. }
                | AppError::Processing(_)
                | AppError::Upload(_)
                | AppError::RecordUpdate(_)
                | AppError::Database(_)
        )
    }

    /// Log level for this error.
    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::InvalidInput(_)
            | AppError::Unauthenticated(_)
            | AppError::Unauthorized(_)
            | AppError::NotFound(_)
            | AppError::PayloadTooLarge(_) => LogLevel::Debug,
            AppError::Processing(_) => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }

    /// Client-facing message. Internal detail is kept out of 5xx responses.
    pub fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(_)
            | AppError::Unauthenticated(_)
            | AppError::Unauthorized(_)
            | AppError::NotFound(_)
            | AppError::PayloadTooLarge(_) => self.to_string(),
            AppError::Staging { .. } => "Unable to stage the upload".to_string(),
            AppError::Processing(_) => "Unable to process the uploaded media".to_string(),
            AppError::Upload(_) => "Unable to store the uploaded media".to_string(),
            AppError::RecordUpdate(_) => "Unable to publish the uploaded media".to_string(),
            AppError::Database(_) => "Database error".to_string(),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Internal server error".to_string()
            }
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}
