//! Typed failure kinds for every API call

/// Closed set of failures a call can produce.
///
/// Classification of an HTTP failure is attempted in a fixed order:
/// 401 → 404 → structured error envelope → raw body. Exactly one variant is
/// produced per failed call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// HTTP 401. Callers should re-authenticate.
    #[error("unauthorized")]
    Unauthorized,

    /// HTTP 404 for the given URL.
    #[error("url [{url}] not found")]
    NotFound { url: String },

    /// Unstructured error body, or locally invalid input (missing argument,
    /// unserializable body, bad header).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The service rejected the request with a structured reason.
    #[error("remote error [{code}]: {message}")]
    Remote { code: String, message: String },

    /// Connection-level failure or timeout before a response existed.
    #[error("transport failure: {0}")]
    Transport(String),

    /// A successful body did not match the caller's result shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl Error {
    /// Validation error for a missing or empty required argument.
    pub fn invalid_argument(name: &str) -> Self {
        Error::Validation(format!("the '{name}' argument is invalid"))
    }
}

/// Result alias for API calls.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_carry_context() {
        assert_eq!(Error::Unauthorized.to_string(), "unauthorized");
        assert_eq!(
            Error::NotFound {
                url: "https://api.descope.com/v1/x".into()
            }
            .to_string(),
            "url [https://api.descope.com/v1/x] not found"
        );
        assert_eq!(
            Error::Remote {
                code: "E011003".into(),
                message: "Request is invalid".into()
            }
            .to_string(),
            "remote error [E011003]: Request is invalid"
        );
        assert!(
            Error::Transport("connection refused".into())
                .to_string()
                .contains("connection refused")
        );
    }

    #[test]
    fn invalid_argument_is_validation() {
        let err = Error::invalid_argument("tenantID");
        assert!(matches!(err, Error::Validation(ref msg) if msg.contains("tenantID")));
    }
}
