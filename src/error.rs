use thiserror::Error;

/// Failure taxonomy for the feedback engine.
///
/// Client errors (`InvalidInput`, `InputTooLarge`) are detected before any
/// backend call is made. Backend errors are split so callers can tell
/// "backend unreachable" from "backend reachable but unusable".
#[derive(Debug, Error)]
pub enum EngineError {
    /// Transcript payload is malformed: empty, bad timestamps, blank text.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Transcript exceeds the configured maximum; we refuse to truncate
    /// because a partial transcript would silently corrupt scoring.
    #[error("transcript too large: {size} chars exceeds maximum of {max}")]
    InputTooLarge { size: usize, max: usize },

    /// Backend did not answer within the configured timeout.
    #[error("backend request timed out")]
    BackendTimeout,

    /// Backend reported rate limiting (HTTP 429).
    #[error("backend rate limited")]
    BackendRateLimited,

    /// Credential rejected (HTTP 401/403). Configuration problem, never retried.
    #[error("backend authentication failed")]
    BackendAuthError,

    /// Backend rejected the request itself (other 4xx). Never retried.
    #[error("backend rejected request: {0}")]
    BackendRejected(String),

    /// Backend-side server error or transport failure (5xx, connection reset).
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Backend produced output that failed validation even after the single
    /// repair cycle.
    #[error("backend produced unusable output: {0}")]
    MalformedBackendOutput(String),
}

impl EngineError {
    /// Whether the retry policy may re-attempt after this failure.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            EngineError::BackendTimeout
                | EngineError::BackendRateLimited
                | EngineError::BackendUnavailable(_)
        )
    }

    /// Whether the fault lies with the caller's payload.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidInput(_) | EngineError::InputTooLarge { .. }
        )
    }
}
