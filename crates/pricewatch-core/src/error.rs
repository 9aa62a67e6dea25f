use thiserror::Error;

/// Application-wide error types for pricewatch.
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP request failed (fetching a results page).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// A CSS selector failed to compile.
    #[error("Selector error: {0}")]
    SelectorError(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Invalid or missing configuration.
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

impl AppError {
    /// Returns true if this error came from the transport layer.
    ///
    /// The search session recovers from transport failures page-by-page;
    /// everything else is surfaced to the caller.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AppError::HttpError(_) | AppError::Timeout(_) | AppError::NetworkError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_are_classified() {
        assert!(AppError::HttpError("HTTP 503".into()).is_transport());
        assert!(AppError::Timeout(30).is_transport());
        assert!(AppError::NetworkError("connection reset".into()).is_transport());
        assert!(!AppError::DatabaseError("disk full".into()).is_transport());
        assert!(!AppError::ConfigError("bad url".into()).is_transport());
    }

    #[test]
    fn display_includes_context() {
        let err = AppError::Timeout(30);
        assert_eq!(err.to_string(), "Request timed out after 30 seconds");
    }
}
