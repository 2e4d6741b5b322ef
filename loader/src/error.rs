use thiserror::Error;

/// Failure surfaced by a fetch closure.
///
/// Both variants are recoverable: a failed fetch never mutates loader
/// state, so callers can retry `load_more()` or fall back to `refresh()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Network-level failure or a non-2xx response.
    #[error("{0}")]
    Transient(String),
    /// The request succeeded but the payload did not match the expected
    /// shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    pub fn transient(message: impl Into<String>) -> Self {
        FetchError::Transient(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        FetchError::Malformed(message.into())
    }
}

impl From<String> for FetchError {
    fn from(message: String) -> Self {
        FetchError::Transient(message)
    }
}

impl From<&str> for FetchError {
    fn from(message: &str) -> Self {
        FetchError::Transient(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_keeps_transient_message_verbatim() {
        let err = FetchError::transient("connection refused");
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn display_prefixes_malformed_responses() {
        let err = FetchError::malformed("missing field `pagination`");
        assert_eq!(
            err.to_string(),
            "malformed response: missing field `pagination`"
        );
    }

    #[test]
    fn string_errors_convert_to_transient() {
        let err: FetchError = "timed out".into();
        assert_eq!(err, FetchError::Transient("timed out".to_string()));
    }
}
