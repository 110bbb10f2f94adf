use thiserror::Error;

/// Failure of a call to the catalog API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never got a response
    #[error("network error: {0}")]
    Network(String),

    /// The API answered with a non-success status
    #[error("HTTP {0}")]
    Status(u16),

    #[error("failed to parse response: {0}")]
    Decode(String),

    #[error("failed to serialize request: {0}")]
    Serialize(String),

    /// A browser API (FormData, window) was unavailable or failed
    #[error("browser error: {0}")]
    Browser(String),
}

impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        match e {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ApiError::Status(404).to_string(), "HTTP 404");
        assert_eq!(
            ApiError::Network("connection refused".to_string()).to_string(),
            "network error: connection refused"
        );
    }

    #[test]
    fn test_transport_failure_maps_to_network() {
        let err = ApiError::from(gloo_net::Error::GlooError("connection refused".to_string()));
        assert!(matches!(err, ApiError::Network(_)));
    }
}
