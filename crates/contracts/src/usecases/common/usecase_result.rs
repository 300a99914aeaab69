use serde::{Deserialize, Serialize};

/// Error body returned by every dashboard endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseCaseError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl UseCaseError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn missing_column(column: &str) -> Self {
        Self::new("MISSING_COLUMN", format!("Column '{}' is missing", column))
            .with_details(column)
    }

    pub fn malformed_commission(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_COMMISSION", message)
    }

    pub fn invalid_csv(message: impl Into<String>) -> Self {
        Self::new("INVALID_CSV", message)
    }

    pub fn invalid_upload(message: impl Into<String>) -> Self {
        Self::new("INVALID_UPLOAD", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

impl std::fmt::Display for UseCaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, ": {}", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for UseCaseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_details() {
        let err = UseCaseError::missing_column("Canal");
        assert_eq!(err.code, "MISSING_COLUMN");
        assert_eq!(err.to_string(), "[MISSING_COLUMN] Column 'Canal' is missing: Canal");
    }

    #[test]
    fn test_internal_has_no_details() {
        let err = UseCaseError::internal("upload task panicked");
        assert_eq!(err.code, "INTERNAL_ERROR");
        assert_eq!(err.to_string(), "[INTERNAL_ERROR] upload task panicked");
    }
}
