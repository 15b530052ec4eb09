use serde_json::Value;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Rejected locally, before any network call
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Non-2xx status or a logical error reported by the service
    #[error("Service returned status {status}: {message}")]
    Transport { status: u16, message: String },

    /// Response body missing an expected field or not parseable
    #[error("Malformed response: {0}")]
    Schema(String),

    #[error("A recommendation request is already in progress")]
    RequestInProgress,
}

impl AppError {
    /// Builds a transport error from a status code and raw response body.
    ///
    /// The human-readable message is extracted from a JSON `detail` or
    /// `error` field when the body parses as JSON; otherwise the raw text
    /// is carried as-is.
    pub fn transport(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("detail")
                    .or_else(|| value.get("error"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| body.to_string());

        AppError::Transport { status, message }
    }
}

pub type AppResult<T> = Result<T, AppError>;
