use serde::Serialize;

/// All application errors, categorized by domain.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ── Portfolio persistence ──
    #[error("Portfolio persistence failed: {0}")]
    Persistence(String),

    #[error("Index {index} out of bounds for portfolio of length {len}")]
    InvalidIndex { index: usize, len: usize },

    // ── Analysis / chart requests ──
    #[error("Request failed: {0}")]
    Request(String),

    // ── Normalization ──
    #[error("Failed to parse {field} field: {value:?}")]
    Parse { field: &'static str, value: String },

    // ── General ──
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn parse(field: &'static str, value: impl Into<String>) -> Self {
        AppError::Parse {
            field,
            value: value.into(),
        }
    }
}

/// Serializable error response for the frontend.
#[derive(Debug, Serialize, Clone)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        let code = match err {
            AppError::Persistence(_) => "PERSISTENCE",
            AppError::InvalidIndex { .. } => "INVALID_INDEX",
            AppError::Request(_) => "REQUEST",
            AppError::Parse { .. } => "PARSE_ERROR",
            AppError::Internal(_) => "INTERNAL",
        };
        ErrorResponse {
            code: code.to_string(),
            message: err.to_string(),
        }
    }
}

// Allow AppError to cross the frontend boundary as a structured payload.
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let response = ErrorResponse::from(self);
        response.serialize(serializer)
    }
}

// ── Conversions from external errors ──

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Request(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
