//! Amazon Rekognition text detection

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_rekognition::error::{DisplayErrorContext, SdkError};
use aws_sdk_rekognition::primitives::Blob;
use aws_sdk_rekognition::types::{Image, TextDetection};
use aws_sdk_rekognition::Client as RekognitionClient;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::detector::{DetectionError, TextDetector};

/// Rekognition `DetectText` backed detector.
///
/// Holds one client for the lifetime of the process; clones share the
/// underlying connection pool.
#[derive(Clone)]
pub struct RekognitionTextDetector {
    client: RekognitionClient,
}

impl Debug for RekognitionTextDetector {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("RekognitionTextDetector").finish()
    }
}

impl RekognitionTextDetector {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: RekognitionClient::new(config),
        }
    }

    pub fn from_client(client: RekognitionClient) -> Self {
        Self { client }
    }

    /// Detected strings in response order. Both LINE and WORD detections are
    /// kept.
    fn fragments(detections: &[TextDetection]) -> Vec<String> {
        detections
            .iter()
            .filter_map(|detection| detection.detected_text())
            .map(str::to_string)
            .collect()
    }
}

#[async_trait]
impl TextDetector for RekognitionTextDetector {
    fn name(&self) -> &str {
        "aws_rekognition"
    }

    #[tracing::instrument(skip(self, image), fields(
        aws.service.name = "rekognition",
        aws.rekognition.operation = "DetectText",
        image.size = image.len()
    ))]
    async fn detect_text(&self, image: Vec<u8>) -> Result<Vec<String>, DetectionError> {
        let start = std::time::Instant::now();

        let rekognition_image = Image::builder().bytes(Blob::new(image)).build();

        let response = self
            .client
            .detect_text()
            .image(rekognition_image)
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                match e {
                    SdkError::ServiceError(_) => DetectionError::Rejected(message),
                    _ => DetectionError::Unavailable(message),
                }
            })?;

        let fragments = Self::fragments(response.text_detections());

        tracing::debug!(
            fragment_count = fragments.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Rekognition text detection completed"
        );

        Ok(fragments)
    }
}
