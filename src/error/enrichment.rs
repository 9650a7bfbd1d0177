//! Enrichment error types.
//!
//! Every failure of a dictionary or image request ends up here. None of them
//! is fatal: the session controller logs the error and leaves the
//! corresponding result list empty.

use thiserror::Error;

use crate::traits::HttpError;

/// Longest body excerpt kept on a decode failure
const BODY_PREVIEW_LEN: usize = 120;

/// How a failure is classified for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Transport error or non-2xx status
    Network,
    /// Payload did not match the expected schema or content type
    Decode,
}

impl FailureKind {
    /// Returns a short label for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Network => "network",
            FailureKind::Decode => "decode",
        }
    }
}

/// Errors produced while fetching definitions or images.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnrichmentError {
    /// The request never produced a usable response
    #[error("network failure: {0}")]
    Network(#[from] HttpError),

    /// The server answered with a non-2xx status
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },

    /// The body did not decode into the expected shape
    #[error("could not decode {endpoint} response: {message} (body: {body_preview})")]
    Decode {
        endpoint: &'static str,
        message: String,
        body_preview: String,
    },

    /// The dictionary knows no entry for the word
    #[error("no dictionary entry for '{word}'")]
    NotFound { word: String },

    /// A direct image fetch returned something that is not an image
    #[error("expected an image, got content type {content_type:?}")]
    UnsupportedContent { content_type: Option<String> },

    /// Image bytes could not be decoded
    #[error("invalid image data: {message}")]
    InvalidImage { message: String },
}

impl EnrichmentError {
    /// Build a decode error, keeping a short excerpt of the offending body.
    pub fn decode(endpoint: &'static str, err: &serde_json::Error, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        let body_preview: String = text.chars().take(BODY_PREVIEW_LEN).collect();
        EnrichmentError::Decode {
            endpoint,
            message: err.to_string(),
            body_preview,
        }
    }

    /// Classify the error (network vs. decode).
    pub fn kind(&self) -> FailureKind {
        match self {
            EnrichmentError::Network(_) | EnrichmentError::Status { .. } => FailureKind::Network,
            EnrichmentError::Decode { .. }
            | EnrichmentError::NotFound { .. }
            | EnrichmentError::UnsupportedContent { .. }
            | EnrichmentError::InvalidImage { .. } => FailureKind::Decode,
        }
    }

    /// Check if retrying the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            EnrichmentError::Network(err) => err.is_retryable(),
            EnrichmentError::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            EnrichmentError::Network(err) => err.error_code(),
            EnrichmentError::Status { .. } => "E_ENRICH_STATUS",
            EnrichmentError::Decode { .. } => "E_ENRICH_DECODE",
            EnrichmentError::NotFound { .. } => "E_ENRICH_NOT_FOUND",
            EnrichmentError::UnsupportedContent { .. } => "E_ENRICH_CONTENT",
            EnrichmentError::InvalidImage { .. } => "E_ENRICH_IMAGE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_errors_classify_as_network() {
        let err: EnrichmentError = HttpError::Timeout("10s".to_string()).into();
        assert_eq!(err.kind(), FailureKind::Network);
        assert!(err.is_retryable());
        assert_eq!(err.error_code(), "E_NET_TIMEOUT");

        let err = EnrichmentError::Status {
            endpoint: "dictionary",
            status: 404,
        };
        assert_eq!(err.kind(), FailureKind::Network);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_decode_errors_classify_as_decode() {
        let serde_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = EnrichmentError::decode("dictionary", &serde_err, b"{");
        assert_eq!(err.kind(), FailureKind::Decode);
        assert_eq!(err.error_code(), "E_ENRICH_DECODE");

        let err = EnrichmentError::UnsupportedContent {
            content_type: Some("text/html".to_string()),
        };
        assert_eq!(err.kind(), FailureKind::Decode);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_decode_body_preview_is_truncated() {
        let body = "x".repeat(500);
        let serde_err = serde_json::from_str::<Vec<u8>>(&body).unwrap_err();
        match EnrichmentError::decode("images", &serde_err, body.as_bytes()) {
            EnrichmentError::Decode { body_preview, .. } => {
                assert_eq!(body_preview.len(), BODY_PREVIEW_LEN);
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_display() {
        let err = EnrichmentError::NotFound {
            word: "lamet".to_string(),
        };
        assert_eq!(err.to_string(), "no dictionary entry for 'lamet'");
        assert_eq!(FailureKind::Network.as_str(), "network");
    }
}
