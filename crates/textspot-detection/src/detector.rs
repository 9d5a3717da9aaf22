use async_trait::async_trait;
use thiserror::Error;

/// Text detection errors
#[derive(Debug, Error)]
pub enum DetectionError {
    /// The service received the request and refused it (bad image, limits,
    /// throttling). Only this orientation is affected.
    #[error("Text detection rejected: {0}")]
    Rejected(String),

    /// The service could not be reached or the client failed before a
    /// response was produced.
    #[error("Text detection unavailable: {0}")]
    Unavailable(String),
}

impl DetectionError {
    /// Whether the failure is specific to the submitted image and can be
    /// treated as "nothing found" for that attempt
    pub fn is_rejection(&self) -> bool {
        matches!(self, DetectionError::Rejected(_))
    }
}

/// Trait implemented by every text detection backend
#[async_trait]
pub trait TextDetector: Send + Sync {
    /// Backend identifier used in logs
    fn name(&self) -> &str;

    /// Detect text in an encoded image, returning fragments in the order the
    /// backend reports them.
    async fn detect_text(&self, image: Vec<u8>) -> Result<Vec<String>, DetectionError>;
}
