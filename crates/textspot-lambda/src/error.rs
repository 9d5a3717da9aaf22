//! Error types for one detector invocation

use textspot_detection::DetectionError;
use textspot_infra::PublishError;
use textspot_processing::ImageError;
use textspot_storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum DetectorError {
    #[error("Event contains no records")]
    EmptyEvent,

    #[error("Event record is missing the {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Detection(#[from] DetectionError),

    #[error(transparent)]
    Publish(#[from] PublishError),
}

impl DetectorError {
    /// Machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            DetectorError::EmptyEvent | DetectorError::MissingField(_) => "INVALID_EVENT",
            DetectorError::Storage(StorageError::NotFound(_)) => "OBJECT_NOT_FOUND",
            DetectorError::Storage(_) => "STORAGE_ERROR",
            DetectorError::Image(ImageError::TooLarge { .. }) => "IMAGE_TOO_LARGE",
            DetectorError::Image(_) => "IMAGE_PROCESSING_ERROR",
            DetectorError::Detection(_) => "DETECTION_ERROR",
            DetectorError::Publish(_) => "PUBLISH_ERROR",
        }
    }

    /// Whether redelivering the same event could succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            DetectorError::Storage(e) => e.is_recoverable(),
            DetectorError::Detection(DetectionError::Unavailable(_)) => true,
            DetectorError::Publish(_) => true,
            _ => false,
        }
    }
}
