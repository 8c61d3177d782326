//! Stable machine-readable error codes shared by every service error.

/// Maps a service error to a stable code string.
///
/// Codes are what callers match on; the `Display` text is for humans and may
/// change wording freely.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

/// Render an error as a `{code, message, retryable}` JSON object.
pub fn error_json(err: &(impl ErrorCode + ?Sized)) -> serde_json::Value {
    serde_json::json!({
        "code": err.error_code(),
        "message": err.to_string(),
        "retryable": err.retryable(),
    })
}
